/// Grid width counted in cells.
#[derive(Eq, PartialEq, Copy, Clone, Debug)]
pub struct Width(pub usize);
/// Grid height counted in cells.
#[derive(Eq, PartialEq, Copy, Clone, Debug)]
pub struct Height(pub usize);
