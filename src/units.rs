#[derive(Eq, PartialEq, Copy, Clone, Debug)]
pub struct RowsCount(pub usize);
#[derive(Eq, PartialEq, Copy, Clone, Debug)]
pub struct ColumnsCount(pub usize);

#[derive(Eq, PartialEq, Copy, Clone, Debug)]
pub struct NodesCount(pub usize);
#[derive(Eq, PartialEq, Copy, Clone, Debug)]
pub struct EdgesCount(pub usize);

/// Raster sizes in pixels.
#[derive(Eq, PartialEq, Copy, Clone, Debug)]
pub struct Width(pub u32);
#[derive(Eq, PartialEq, Copy, Clone, Debug)]
pub struct Height(pub u32);

/// Pixel lengths used to lay out passages and walls on the raster.
#[derive(Eq, PartialEq, Copy, Clone, Debug)]
pub struct PathWidth(pub u32);
#[derive(Eq, PartialEq, Copy, Clone, Debug)]
pub struct WallWidth(pub u32);
#[derive(Eq, PartialEq, Copy, Clone, Debug)]
pub struct OuterWallWidth(pub u32);
