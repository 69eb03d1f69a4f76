use common::shapes::Disc;
use nalgebra::Vector2;

/// Whether two discs intersect. Integer math throughout; touching discs
/// count as intersecting.
pub fn disc_disc_intersect(a: &Disc, b: &Disc) -> bool {
    let dx = (a.x - b.x) as i64;
    let dy = (a.y - b.y) as i64;
    let reach = (a.radius + b.radius) as i64;
    dx * dx + dy * dy <= reach * reach
}

/// Minimal translation vector that separates `disc` from the closest
/// intersecting disc in `others`, or `None` when it intersects nothing.
///
/// The vector points from the other disc toward `disc` and its length is the
/// penetration depth, so adding it to `disc`'s center resolves the contact.
pub fn get_mtv(disc: &Disc, others: &[Disc]) -> Option<(f32, f32)> {
    others
        .iter()
        .filter_map(|other| {
            if !disc_disc_intersect(disc, other) {
                return None;
            }

            let center = Vector2::new(disc.x as f32, disc.y as f32);
            let other_center = Vector2::new(other.x as f32, other.y as f32);
            let to_disc = center - other_center;
            let distance = to_disc.magnitude();
            let reach = (disc.radius + other.radius) as f32;

            let (normal, penetration) = if distance == 0.0 {
                // concentric discs have no preferred direction
                (Vector2::new(1.0, 0.0), reach)
            } else {
                (to_disc / distance, reach - distance)
            };

            Some((normal.x * penetration, normal.y * penetration))
        })
        .min_by(|a, b| {
            let a_mag = (a.0 * a.0 + a.1 * a.1).sqrt();
            let b_mag = (b.0 * b.0 + b.1 * b.1).sqrt();
            a_mag.partial_cmp(&b_mag).unwrap_or(std::cmp::Ordering::Equal)
        })
        .and_then(|(x, y)| {
            let magnitude = (x * x + y * y).sqrt();
            if magnitude < 1e-6 {
                None
            } else {
                Some((x, y))
            }
        })
}
