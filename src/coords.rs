//! Coordinate conversions between grid cells, world space, and the
//! isometric screen projection used by renderers.
//!
//! Conventions: the grid is row-major, `(row, col)` indexed; world space is
//! cartesian with `x` growing along columns and `y` along rows; world
//! positions of tiles refer to tile centers. Cell-valued `IVec2`s store
//! `(x = col, y = row)`.

use glam::{IVec2, Vec2};

/// World coordinate of a tile's center.
pub fn tile_to_world(row: usize, col: usize, tile_size: f32) -> Vec2 {
    Vec2::new(
        (col as f32 + 0.5) * tile_size,
        (row as f32 + 0.5) * tile_size,
    )
}

/// Grid cell containing a world coordinate, as `(x = col, y = row)`.
pub fn world_to_tile(x: f32, y: f32, tile_size: f32) -> IVec2 {
    IVec2::new(
        (x / tile_size).floor() as i32,
        (y / tile_size).floor() as i32,
    )
}

/// Screen position of a tile in the isometric projection.
pub fn world_to_iso(
    row: f32,
    col: f32,
    tile_width: f32,
    tile_iso_height: f32,
    tile_image_height: f32,
    offset_x: f32,
    offset_y: f32,
) -> Vec2 {
    Vec2::new(
        (col - row) * tile_width / 2.0 - offset_x,
        (col + row) * tile_iso_height / 2.0 - (tile_image_height - tile_iso_height) - offset_y,
    )
}

/// Projects a cartesian world position into isometric screen space.
pub fn cart_to_iso(x: f32, y: f32, tile_width: f32, tile_iso_height: f32) -> Vec2 {
    Vec2::new(
        (x - y) / 2.0,
        (x + y) * (tile_iso_height / (2.0 * tile_width)) - tile_iso_height / 2.0,
    )
}

/// Inverse of [`cart_to_iso`].
pub fn iso_to_cart(iso_x: f32, iso_y: f32, tile_width: f32, tile_iso_height: f32) -> Vec2 {
    let base = (iso_y + tile_iso_height / 2.0) * tile_width / tile_iso_height;
    Vec2::new(iso_x + base, base - iso_x)
}

/// Translates a screen coordinate into fractional tile indices,
/// returned as `(x = col, y = row)`.
pub fn screen_to_tile(
    screen_x: f32,
    screen_y: f32,
    tile_width: f32,
    tile_iso_height: f32,
    tile_image_height: f32,
    iso_x: f32,
    iso_y: f32,
) -> Vec2 {
    let sy = screen_y + iso_y + (tile_image_height - tile_iso_height);
    let sx = screen_x + iso_x;
    Vec2::new(
        sy / tile_iso_height + sx / tile_width,
        sy / tile_iso_height - sx / tile_width,
    )
}
