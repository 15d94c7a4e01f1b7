use core::fmt;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum SwipeDirection {
    Up,
    Down,
    Left,
    Right,
}

impl SwipeDirection {
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Up => "up",
            Self::Down => "down",
            Self::Left => "left",
            Self::Right => "right",
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum PinchDirection {
    In,
    Out,
}

impl PinchDirection {
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::In => "in",
            Self::Out => "out",
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum RotateDirection {
    Clockwise,
    Counterclockwise,
}

impl RotateDirection {
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Clockwise => "clockwise",
            Self::Counterclockwise => "counterclockwise",
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum GestureKind {
    Tap,
    Hold,
    Swipe,
    Pinch,
    Rotate,
}

impl GestureKind {
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Tap => "tap",
            Self::Hold => "hold",
            Self::Swipe => "swipe",
            Self::Pinch => "pinch",
            Self::Rotate => "rotate",
        }
    }
}

/// A recognized gesture. Equality compares the variant and every field, so
/// a two-finger swipe left never matches a two-finger swipe right.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Gesture {
    Tap {
        finger_count: u8,
    },
    Hold {
        finger_count: u8,
    },
    Swipe {
        finger_count: u8,
        direction: SwipeDirection,
    },
    Pinch {
        finger_count: u8,
        direction: PinchDirection,
    },
    Rotate {
        finger_count: u8,
        direction: RotateDirection,
    },
}

impl Gesture {
    pub const fn kind(&self) -> GestureKind {
        match self {
            Self::Tap { .. } => GestureKind::Tap,
            Self::Hold { .. } => GestureKind::Hold,
            Self::Swipe { .. } => GestureKind::Swipe,
            Self::Pinch { .. } => GestureKind::Pinch,
            Self::Rotate { .. } => GestureKind::Rotate,
        }
    }

    pub const fn finger_count(&self) -> u8 {
        match *self {
            Self::Tap { finger_count }
            | Self::Hold { finger_count }
            | Self::Swipe { finger_count, .. }
            | Self::Pinch { finger_count, .. }
            | Self::Rotate { finger_count, .. } => finger_count,
        }
    }

    pub const fn direction(&self) -> Option<&'static str> {
        match *self {
            Self::Tap { .. } | Self::Hold { .. } => None,
            Self::Swipe { direction, .. } => Some(direction.as_str()),
            Self::Pinch { direction, .. } => Some(direction.as_str()),
            Self::Rotate { direction, .. } => Some(direction.as_str()),
        }
    }

    /// Repeatable gestures keep firing while the contact persists and are
    /// reported with begin/update/end tags.
    pub const fn repeatable(&self) -> bool {
        !matches!(self, Self::Tap { .. })
    }

    pub fn identity(&self) -> GestureIdentity {
        // At most kind, fingers and direction: never more than the key
        // capacity.
        let keys = [
            IndexKey::Kind(self.kind()),
            IndexKey::Fingers(self.finger_count()),
        ]
        .into_iter()
        .chain(self.direction().map(IndexKey::Direction))
        .collect();
        GestureIdentity { keys }
    }
}

impl fmt::Display for Gesture {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.identity().fmt(f)
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum IndexKey {
    Kind(GestureKind),
    Fingers(u8),
    Direction(&'static str),
}

impl fmt::Display for IndexKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Kind(kind) => f.write_str(kind.as_str()),
            Self::Fingers(count) => write!(f, "{count}"),
            Self::Direction(direction) => f.write_str(direction),
        }
    }
}

/// Ordered symbolic keys an action dispatcher matches against, e.g.
/// `swipe.3.left`.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct GestureIdentity {
    keys: heapless::Vec<IndexKey, 3>,
}

impl GestureIdentity {
    pub fn keys(&self) -> &[IndexKey] {
        &self.keys
    }
}

impl fmt::Display for GestureIdentity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (idx, key) in self.keys.iter().enumerate() {
            if idx > 0 {
                f.write_str(".")?;
            }
            key.fmt(f)?;
        }
        Ok(())
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum LifecycleTag {
    None,
    Begin,
    Update,
    End,
}

impl LifecycleTag {
    pub const fn as_str(self) -> Option<&'static str> {
        match self {
            Self::None => None,
            Self::Begin => Some("begin"),
            Self::Update => Some("update"),
            Self::End => Some("end"),
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct LifecycleEvent {
    pub identity: GestureIdentity,
    pub tag: LifecycleTag,
    pub emitted_at_ms: u64,
}

impl LifecycleEvent {
    pub fn new(gesture: &Gesture, tag: LifecycleTag, emitted_at_ms: u64) -> Self {
        Self {
            identity: gesture.identity(),
            tag,
            emitted_at_ms,
        }
    }
}

impl fmt::Display for LifecycleEvent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.identity.fmt(f)?;
        if let Some(tag) = self.tag.as_str() {
            write!(f, ".{tag}")?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn only_tap_is_not_repeatable() {
        assert!(!Gesture::Tap { finger_count: 1 }.repeatable());
        assert!(Gesture::Hold { finger_count: 1 }.repeatable());
        assert!(Gesture::Swipe {
            finger_count: 3,
            direction: SwipeDirection::Up
        }
        .repeatable());
        assert!(Gesture::Pinch {
            finger_count: 2,
            direction: PinchDirection::In
        }
        .repeatable());
        assert!(Gesture::Rotate {
            finger_count: 2,
            direction: RotateDirection::Clockwise
        }
        .repeatable());
    }

    #[test]
    fn equality_includes_direction() {
        let left = Gesture::Swipe {
            finger_count: 2,
            direction: SwipeDirection::Left,
        };
        let right = Gesture::Swipe {
            finger_count: 2,
            direction: SwipeDirection::Right,
        };
        assert_ne!(left, right);
        assert_ne!(
            Gesture::Tap { finger_count: 1 },
            Gesture::Hold { finger_count: 1 }
        );
    }

    #[test]
    fn identity_renders_ordered_keys() {
        let pinch = Gesture::Pinch {
            finger_count: 2,
            direction: PinchDirection::Out,
        };
        assert_eq!(pinch.identity().to_string(), "pinch.2.out");
        assert_eq!(
            pinch.identity().keys(),
            &[
                IndexKey::Kind(GestureKind::Pinch),
                IndexKey::Fingers(2),
                IndexKey::Direction("out")
            ]
        );
        assert_eq!(Gesture::Tap { finger_count: 3 }.to_string(), "tap.3");
    }

    #[test]
    fn directionless_identity_stops_at_finger_count() {
        assert_eq!(
            Gesture::Hold { finger_count: 4 }.identity().keys(),
            &[IndexKey::Kind(GestureKind::Hold), IndexKey::Fingers(4)]
        );
    }

    #[test]
    fn event_label_appends_lifecycle_tag() {
        let hold = Gesture::Hold { finger_count: 1 };
        assert_eq!(
            LifecycleEvent::new(&hold, LifecycleTag::Begin, 10).to_string(),
            "hold.1.begin"
        );
        assert_eq!(
            LifecycleEvent::new(&hold, LifecycleTag::None, 10).to_string(),
            "hold.1"
        );
    }
}
