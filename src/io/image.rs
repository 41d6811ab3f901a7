//! PNG preview of one vertical layer, seen from above

use std::path::Path;

use glam::Vec3;
use image::{ImageBuffer, Rgba};

use crate::io::configuration::MAX_PREVIEW_DIMENSION;
use crate::io::error::{Result, TileError, invalid_parameter};
use crate::spatial::{CellId, Orientation, TileLayer};

// Half extents of a unit pointy-top hex in the plane
const HALF_WIDTH: f32 = 0.866_025_4;
const HALF_DEPTH: f32 = 1.0;

const PALETTE: [[u8; 3]; 8] = [
    [230, 57, 70],
    [69, 123, 157],
    [42, 157, 143],
    [233, 196, 106],
    [244, 162, 97],
    [131, 56, 236],
    [58, 134, 255],
    [106, 153, 78],
];

#[derive(Debug)]
struct PlanarBounds {
    min_x: f32,
    max_x: f32,
    min_z: f32,
    max_z: f32,
}

// Smallest x/z rectangle covering every tile on the layer
fn calculate_bounds(cells: impl Iterator<Item = CellId>) -> Option<PlanarBounds> {
    cells.fold(None, |bounds, cell| {
        let center = cell.unit_center();
        let tile = PlanarBounds {
            min_x: center.x - HALF_WIDTH,
            max_x: center.x + HALF_WIDTH,
            min_z: center.z - HALF_DEPTH,
            max_z: center.z + HALF_DEPTH,
        };
        Some(match bounds {
            None => tile,
            Some(bounds) => PlanarBounds {
                min_x: bounds.min_x.min(tile.min_x),
                max_x: bounds.max_x.max(tile.max_x),
                min_z: bounds.min_z.min(tile.min_z),
                max_z: bounds.max_z.max(tile.max_z),
            },
        })
    })
}

/// Colour for a tile id, darkened per rotation step and lightened when flipped
pub fn tile_color(tile: i32, orientation: Orientation) -> Rgba<u8> {
    let index = tile.rem_euclid(PALETTE.len() as i32) as usize;
    let base = PALETTE.get(index).copied().unwrap_or([255, 255, 255]);
    let shade = 1.0 - 0.1 * orientation.steps() as f32;
    let lift = if orientation.is_flipped() { 40.0 } else { 0.0 };
    let channel = |value: u8| (f32::from(value).mul_add(shade, lift)).clamp(0.0, 255.0) as u8;
    Rgba([channel(base[0]), channel(base[1]), channel(base[2]), 255])
}

/// Render the tiles of layer `y` as a PNG with transparent background
///
/// Each pixel is coloured by the tile of the cell containing its centre;
/// `scale` is the number of pixels per unit of hex radius.
///
/// # Errors
///
/// Returns an error if:
/// - `scale` is zero or the image would exceed the maximum dimension
/// - The layer holds no tiles
/// - The parent directory cannot be created
/// - The image cannot be saved to the specified path
pub fn export_layer_as_png(layer: &TileLayer, y: i32, scale: u32, output_path: &Path) -> Result<()> {
    if scale == 0 {
        return Err(invalid_parameter("scale", &scale, &"must be at least 1"));
    }

    let bounds = calculate_bounds(
        layer
            .iter()
            .filter(|placement| placement.cell.y == y)
            .map(|placement| placement.cell),
    )
    .ok_or_else(|| invalid_parameter("layer", &y, &"no tiles have been placed on this layer"))?;

    let pixels_per_unit = scale as f32;
    let width = ((bounds.max_x - bounds.min_x) * pixels_per_unit).ceil() as u32;
    let height = ((bounds.max_z - bounds.min_z) * pixels_per_unit).ceil() as u32;
    if width > MAX_PREVIEW_DIMENSION || height > MAX_PREVIEW_DIMENSION {
        return Err(invalid_parameter(
            "scale",
            &scale,
            &format!("preview would be {width}x{height} pixels, limit is {MAX_PREVIEW_DIMENSION}"),
        ));
    }

    let img = ImageBuffer::from_fn(width, height, |px, py| {
        let point = Vec3::new(
            bounds.min_x + (px as f32 + 0.5) / pixels_per_unit,
            y as f32,
            bounds.min_z + (py as f32 + 0.5) / pixels_per_unit,
        );
        layer
            .get(CellId::from_point(point))
            .map_or(Rgba([0, 0, 0, 0]), |(tile, orientation)| {
                tile_color(tile, orientation)
            })
    });

    if let Some(parent) = output_path
        .parent()
        .filter(|parent| !parent.as_os_str().is_empty())
    {
        std::fs::create_dir_all(parent).map_err(|e| TileError::FileSystem {
            path: parent.to_path_buf(),
            operation: "create directory",
            source: e,
        })?;
    }

    img.save(output_path).map_err(|e| TileError::ImageExport {
        path: output_path.to_path_buf(),
        source: e,
    })?;

    Ok(())
}
