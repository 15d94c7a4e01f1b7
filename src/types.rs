pub type FingerId = u32;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum TouchStatus {
    Begin,
    Update,
    End,
}

impl TouchStatus {
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Begin => "begin",
            Self::Update => "update",
            Self::End => "end",
        }
    }
}

/// Position on the panel, in millimeters unless stated otherwise.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

impl Point {
    pub const fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }
}

/// One contact report for one finger. `begin`/`update` samples carry a
/// position, `end` samples do not.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct TouchSample {
    pub finger: FingerId,
    pub status: TouchStatus,
    pub t_ms: u64,
    pub position_mm: Option<Point>,
    pub position_px: Option<Point>,
}

impl TouchSample {
    pub fn begin(finger: FingerId, t_ms: u64, position_mm: Point) -> Self {
        Self {
            finger,
            status: TouchStatus::Begin,
            t_ms,
            position_mm: Some(position_mm),
            position_px: None,
        }
    }

    pub fn update(finger: FingerId, t_ms: u64, position_mm: Point) -> Self {
        Self {
            finger,
            status: TouchStatus::Update,
            t_ms,
            position_mm: Some(position_mm),
            position_px: None,
        }
    }

    pub fn end(finger: FingerId, t_ms: u64) -> Self {
        Self {
            finger,
            status: TouchStatus::End,
            t_ms,
            position_mm: None,
            position_px: None,
        }
    }

    pub fn with_position_px(mut self, position_px: Point) -> Self {
        self.position_px = Some(position_px);
        self
    }

    pub fn has_position(&self) -> bool {
        self.position_mm.is_some()
    }
}
