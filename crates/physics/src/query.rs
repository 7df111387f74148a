use sandbox_kernel::World;

/// What collision resolution needs to know about the world.
///
/// Cells outside the grid must report solid.
pub trait SolidityQuery {
    fn is_solid_cell(&self, gx: i32, gy: i32) -> bool;

    /// Edge length of one cell in pixels.
    fn cell_size(&self) -> f32;

    /// World extent in pixels.
    fn extent(&self) -> (f32, f32);

    fn is_solid_at(&self, x: f32, y: f32) -> bool {
        let s = self.cell_size();
        self.is_solid_cell((x / s).floor() as i32, (y / s).floor() as i32)
    }
}

impl SolidityQuery for World {
    fn is_solid_cell(&self, gx: i32, gy: i32) -> bool {
        self.grid().is_solid_cell(gx, gy)
    }

    fn cell_size(&self) -> f32 {
        self.tile_size() as f32
    }

    fn extent(&self) -> (f32, f32) {
        (self.pixel_width(), self.pixel_height())
    }
}
