//! Example mapping image region colors onto a small tile palette.
//!
//! Each "tile" is labeled by its average color. A synthetic source image is sampled on a grid and
//! every cell is replaced by the tile closest in color.

use kdmap::{Mapper, Point};

fn main() {
    let tiles = [
        ([0u8, 0, 0], '#'),
        ([255, 255, 255], '.'),
        ([200, 40, 40], 'r'),
        ([40, 160, 60], 'g'),
        ([50, 70, 200], 'b'),
        ([128, 128, 128], '+'),
    ];
    let mapper = Mapper::new(tiles.iter().map(|(color, tile)| (Point::new(*color), *tile)))
        .expect("tile colors are finite");

    // a horizontal gradient from black to white with a red band in the middle
    let (rows, columns) = (8, 32);
    let canvas = mapper
        .map_grid(rows, columns, |row, column| {
            let v = (column * 255 / (columns - 1)) as u8;
            if row == 3 || row == 4 {
                Point::new([v.max(120), v / 4, v / 4])
            } else {
                Point::new([v, v, v])
            }
        })
        .expect("every tile has a payload");

    for row in canvas {
        let line: String = row.into_iter().collect();
        println!("{}", line);
    }
}
