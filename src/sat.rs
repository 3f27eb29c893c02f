use nanorand::{Rng, WyRand};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Rect {
    pub width: u32,
    pub height: u32,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Point {
    pub x: u32,
    pub y: u32,
}

/// True when no occupied pixel lies in the `width` x `height` block whose
/// top-left pixel is `(x + 1, y + 1)`.
pub fn region_is_empty(
    table: &[u32],
    table_width: usize,
    x: usize,
    y: usize,
    width: usize,
    height: usize,
) -> bool {
    let tl = table[y * table_width + x];
    let tr = table[y * table_width + x + width];

    let bl = table[(y + height) * table_width + x];
    let br = table[(y + height) * table_width + x + width];

    tl as i64 + br as i64 - tr as i64 - bl as i64 == 0
}

/// 在图片寻找位置写字
///
/// Picks uniformly among every free position (reservoir sampling) and
/// returns the top-left pixel of the free block.
pub fn find_space_for_rect(
    table: &[u32],
    table_width: u32,
    table_height: u32,
    rect: &Rect,
    rng: &mut WyRand,
) -> Option<Point> {
    if rect.width == 0 || rect.height == 0 {
        return None;
    }
    if rect.width >= table_width || rect.height >= table_height {
        return None;
    }

    let max_x = table_width - rect.width;
    let max_y = table_height - rect.height;

    let mut available_points: u32 = 0;
    let mut random_point = None;

    for y in 0..max_y {
        for x in 0..max_x {
            let empty = region_is_empty(
                table,
                table_width as usize,
                x as usize,
                y as usize,
                rect.width as usize,
                rect.height as usize,
            );
            if empty {
                let random_num = rng.generate_range(0..=available_points);
                if random_num == available_points {
                    random_point = Some(Point { x: x + 1, y: y + 1 });
                }
                available_points += 1;
            }
        }
    }

    random_point
}

/// Rebuilds the summed-area table from `occupancy`, starting at `start_row`.
/// Rows above `start_row` must already be up to date.
///
/// https://blog.demofox.org/2018/04/16/prefix-sums-and-summed-area-tables/
pub fn to_summed_area_table(table: &mut [u32], occupancy: &[u8], width: usize, start_row: usize) {
    let mut prev_row = if start_row == 0 {
        vec![0; width]
    } else {
        table[(start_row - 1) * width..start_row * width].to_vec()
    };

    table
        .chunks_exact_mut(width)
        .zip(occupancy.chunks_exact(width))
        .skip(start_row)
        .for_each(|(row, source)| {
            let mut sum = 0;
            row.iter_mut()
                .zip(source.iter())
                .zip(prev_row.iter())
                .for_each(|((el, pixel), prev_row_el)| {
                    sum += *pixel as u32;
                    *el = sum + prev_row_el;
                });

            prev_row.clone_from_slice(row)
        });
}
