//! Per-supplier statistics over the post corpus

use mandi_domain::traits::SupplierDetector;
use mandi_domain::{Post, Supplier};

/// Activity attributed to one supplier
#[derive(Debug, Clone, PartialEq)]
pub struct SupplierStats {
    /// Posts whose detection names the supplier
    pub total_posts: usize,

    /// Likes summed over those posts
    pub total_likes: u64,

    /// Dislikes summed over those posts
    pub total_dislikes: u64,

    /// Share of up-votes on the supplier itself, in percent with one
    /// decimal; `None` when no post mentions it or it has no votes
    pub average_rating: Option<f64>,
}

/// Posts the detector attributes to `supplier`, in corpus order
pub fn attributed_posts<'a, D: SupplierDetector>(
    detector: &D,
    supplier: &Supplier,
    posts: &'a [Post],
) -> Vec<&'a Post> {
    posts
        .iter()
        .filter(|post| {
            detector
                .detect(post)
                .is_some_and(|detected| supplier.has_name(&detected.name))
        })
        .collect()
}

/// Compute statistics for one supplier
pub fn supplier_stats<D: SupplierDetector>(
    detector: &D,
    supplier: &Supplier,
    posts: &[Post],
) -> SupplierStats {
    let attributed = attributed_posts(detector, supplier, posts);

    let total_likes = attributed.iter().map(|p| u64::from(p.likes)).sum();
    let total_dislikes = attributed.iter().map(|p| u64::from(p.dislikes)).sum();

    let votes = u64::from(supplier.thumbs_up) + u64::from(supplier.thumbs_down);
    let average_rating = if attributed.is_empty() || votes == 0 {
        None
    } else {
        let percent = f64::from(supplier.thumbs_up) * 100.0 / votes as f64;
        Some((percent * 10.0).round() / 10.0)
    };

    SupplierStats {
        total_posts: attributed.len(),
        total_likes,
        total_dislikes,
        average_rating,
    }
}
