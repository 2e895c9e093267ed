use ggez::graphics::{DrawMode, Mesh, MeshBuilder, Rect};
use ggez::{Context, GameResult};

use crate::app::palette::Palette;
use eel::basic::{to_pixel, Bounds, Point, GRID_SIDE};
use eel::eel::Eel;
use eel::food::Food;
use eel::prefs::Prefs;

pub fn grid_mesh(bounds: &Bounds, cell_size: f32, palette: &Palette, ctx: &Context) -> GameResult<Mesh> {
    let mut builder = MeshBuilder::new();

    for i in 0..=GRID_SIDE {
        let d = i as f32 * cell_size;
        let x = bounds.origin.x + d;
        let y = bounds.origin.y + d;
        let vertical = [Point { x, y: bounds.origin.y }, Point { x, y: bounds.bottom() }];
        let horizontal = [Point { x: bounds.origin.x, y }, Point { x: bounds.right(), y }];
        builder
            .line(&vertical, palette.grid_thickness, palette.grid_color)?
            .line(&horizontal, palette.grid_thickness, palette.grid_color)?;
    }

    let Point { x, y } = bounds.origin;
    let border = Rect::new(x, y, bounds.size.x, bounds.size.y);
    builder.rectangle(DrawMode::stroke(palette.border_thickness), border, palette.border_color)?;

    Ok(Mesh::from_data(ctx, builder.build()))
}

/// Body segments first so the head is drawn on top
pub fn eel_mesh(eel: &Eel, bounds: &Bounds, prefs: &Prefs, palette: &Palette, ctx: &Context) -> GameResult<Mesh> {
    let mut builder = MeshBuilder::new();
    let len = eel.segment_count() + 1;

    for (seg, pos) in eel
        .body()
        .iter()
        .enumerate()
        .rev()
        .filter_map(|(seg, segment)| Some((seg + 1, segment.pos()?)))
    {
        let dest = to_pixel(pos, bounds, prefs.cell_size);
        builder.circle(DrawMode::fill(), dest, prefs.eel_radius, 0.1, palette.segment_color(seg, len))?;
    }

    let head = to_pixel(eel.pos(), bounds, prefs.cell_size);
    builder.circle(DrawMode::fill(), head, prefs.eel_radius, 0.1, palette.head_color())?;

    Ok(Mesh::from_data(ctx, builder.build()))
}

pub fn food_mesh(food: &Food, bounds: &Bounds, prefs: &Prefs, palette: &Palette, ctx: &Context) -> GameResult<Mesh> {
    let dest = to_pixel(food.position().to_grid_pos(), bounds, prefs.cell_size);
    Mesh::new_circle(ctx, DrawMode::fill(), dest, prefs.food_radius, 0.1, palette.food_color)
}
