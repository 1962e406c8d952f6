//! SymNMF vs k-means on a small 2D dataset, scored by silhouette.
//!
//! Run with `RUST_LOG=debug` to see iteration counts.

use symnmf::cluster::{metrics, similarity, Init, Kmeans, SymNmf};

fn main() -> symnmf::Result<()> {
    env_logger::init();

    // Three groups in 2D.
    let data: Vec<Vec<f64>> = vec![
        // Group A (near origin)
        vec![0.0, 0.0],
        vec![0.4, 0.3],
        vec![0.2, 0.6],
        vec![-0.3, 0.2],
        // Group B (near (4, 4))
        vec![4.0, 4.0],
        vec![4.3, 3.8],
        vec![3.7, 4.2],
        vec![4.1, 4.5],
        // Group C (near (8, 0))
        vec![8.0, 0.0],
        vec![8.2, 0.4],
        vec![7.7, -0.3],
        vec![8.4, 0.1],
    ];
    let k = 3;

    let w = similarity::normalized_affinity(&data)?;
    println!("=== norm (first 4 rows) ===");
    for i in 0..4 {
        let row: Vec<String> = w.row(i).iter().map(|v| format!("{v:.4}")).collect();
        println!("  {}", row.join(","));
    }

    // --- SymNMF ---
    let nmf = SymNmf::new(k).with_seed(1234).fit(&data)?;
    println!(
        "\n=== SymNMF (k={k}, {} iterations, converged={}) ===",
        nmf.n_iter, nmf.converged
    );
    for (i, label) in nmf.labels.iter().enumerate() {
        println!("  point {:2} ({:5.1}, {:5.1}) => cluster {}", i, data[i][0], data[i][1], label);
    }

    // --- K-means, first-k seeding ---
    let km = Kmeans::new(k).with_init(Init::FirstK).fit(&data)?;
    println!("\n=== K-means, first-k seeds (k={k}, {} iterations) ===", km.n_iter);
    for centroid in &km.centroids {
        let row: Vec<String> = centroid.iter().map(|v| format!("{v:.4}")).collect();
        println!("  centroid {}", row.join(","));
    }

    // --- K-means, k-means++ seeding ---
    let kmpp = Kmeans::new(k).with_seed(1234).fit(&data)?;
    println!(
        "\n=== K-means, k-means++ seeds (k={k}, inertia {:.4}) ===",
        kmpp.inertia
    );

    println!("\nnmf: {:.4}", metrics::silhouette_score(&data, &nmf.labels)?);
    println!("kmeans (first-k): {:.4}", metrics::silhouette_score(&data, &km.labels)?);
    println!("kmeans (k-means++): {:.4}", metrics::silhouette_score(&data, &kmpp.labels)?);

    Ok(())
}
