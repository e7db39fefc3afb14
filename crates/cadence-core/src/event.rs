//! The closed event payload enum carried through event channels.
//!
//! Channels treat the payload as opaque: they never match on it. The
//! shapes here are the union of what a desktop platform layer produces
//! (keyboard, mouse, joystick, window, quit). A closed enum is used
//! instead of type erasure so payloads are `Copy` and cross-crate type
//! identity can never diverge.

/// Mouse button identifier as reported by the platform layer.
pub type MouseButton = u8;

/// Keyboard scancode as reported by the platform layer.
pub type Scancode = u32;

/// A single native event polled from an [`EventSource`](crate::EventSource).
///
/// Queued FIFO by the producer loop and dispatched in enqueue order to
/// every registered observer by the consumer loop.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Event {
    /// A key went down.
    KeyDown {
        /// Platform scancode of the key.
        scancode: Scancode,
    },
    /// A key was released.
    KeyUp {
        /// Platform scancode of the key.
        scancode: Scancode,
    },
    /// The pointer moved to a new window-relative position.
    MouseMotion {
        /// Window-relative x coordinate in pixels.
        x: i32,
        /// Window-relative y coordinate in pixels.
        y: i32,
    },
    /// A mouse button went down.
    MouseButtonDown {
        /// Which button.
        button: MouseButton,
        /// Window-relative x coordinate at press time.
        x: i32,
        /// Window-relative y coordinate at press time.
        y: i32,
    },
    /// A mouse button was released.
    MouseButtonUp {
        /// Which button.
        button: MouseButton,
        /// Window-relative x coordinate at release time.
        x: i32,
        /// Window-relative y coordinate at release time.
        y: i32,
    },
    /// A joystick axis moved.
    JoystickAxis {
        /// Axis index on the device.
        axis: u8,
        /// Raw axis value, platform range (typically -32768..=32767).
        value: i16,
    },
    /// A joystick button changed state.
    JoystickButton {
        /// Button index on the device.
        button: u8,
        /// `true` on press, `false` on release.
        pressed: bool,
    },
    /// The window was resized.
    WindowResized {
        /// New client width in pixels.
        width: u32,
        /// New client height in pixels.
        height: u32,
    },
    /// The window gained input focus.
    FocusGained,
    /// The window lost input focus.
    FocusLost,
    /// The user asked the application to quit.
    Quit,
}

impl Event {
    /// Whether this event signals application shutdown.
    pub fn is_quit(&self) -> bool {
        matches!(self, Event::Quit)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn quit_predicate() {
        assert!(Event::Quit.is_quit());
        assert!(!Event::FocusLost.is_quit());
        assert!(!Event::KeyDown { scancode: 41 }.is_quit());
    }

    #[test]
    fn events_are_copy_and_comparable() {
        let a = Event::MouseMotion { x: 10, y: -4 };
        let b = a;
        assert_eq!(a, b);
        assert_ne!(a, Event::MouseMotion { x: 10, y: 4 });
    }
}
