use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use crate::point::Point;
use crate::r#type::IndexableNum;

pub(crate) fn seeded_rng() -> StdRng {
    StdRng::seed_from_u64(42)
}

/// Random integral 3D points with every coordinate in `0..max`. A small `max` forces many
/// duplicate coordinates and exact distance ties.
pub(crate) fn random_points(rng: &mut StdRng, n: usize, max: i32) -> Vec<Point<i32, 3>> {
    (0..n)
        .map(|_| {
            Point::new([
                rng.gen_range(0..max),
                rng.gen_range(0..max),
                rng.gen_range(0..max),
            ])
        })
        .collect()
}

/// Exhaustive scan for the point minimizing (squared distance, point order).
pub(crate) fn brute_force_nearest<N: IndexableNum, const D: usize>(
    points: &[Point<N, D>],
    query: &Point<N, D>,
) -> Option<(Point<N, D>, N::Distance)> {
    let mut best: Option<(Point<N, D>, N::Distance)> = None;
    for point in points {
        let dist = point.sq_dist(query);
        best = match best {
            Some((best_point, best_dist))
                if best_dist < dist || (best_dist == dist && best_point <= *point) =>
            {
                Some((best_point, best_dist))
            }
            _ => Some((*point, dist)),
        };
    }
    best
}

/// Palette of primary and secondary colors, in a fixed order.
pub(crate) fn palette() -> Vec<(Point<u8, 3>, &'static str)> {
    vec![
        (Point::new([0, 0, 0]), "black"),
        (Point::new([255, 255, 255]), "white"),
        (Point::new([255, 0, 0]), "red"),
        (Point::new([0, 255, 0]), "green"),
        (Point::new([0, 0, 255]), "blue"),
        (Point::new([255, 255, 0]), "yellow"),
        (Point::new([0, 255, 255]), "cyan"),
        (Point::new([255, 0, 255]), "magenta"),
    ]
}
