use egui::{Context, Event, Key, Modifiers, PointerButton, Pos2, Rect};

/// Represents which panel an input event occurred in
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PanelKind {
    /// The central drawing canvas
    Central,
    /// Toolbar, property editor and other chrome
    Chrome,
}

/// Represents the location where an input event occurred
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct InputLocation {
    /// Canvas-local document coordinates
    pub position: Pos2,
    /// The panel in which the event occurred
    pub panel: PanelKind,
}

impl InputLocation {
    /// A location on the canvas, for driving the controller directly.
    pub fn canvas(x: f32, y: f32) -> Self {
        Self {
            position: Pos2::new(x, y),
            panel: PanelKind::Central,
        }
    }

    pub fn chrome(x: f32, y: f32) -> Self {
        Self {
            position: Pos2::new(x, y),
            panel: PanelKind::Chrome,
        }
    }

    pub fn is_in_canvas(&self) -> bool {
        self.panel == PanelKind::Central
    }
}

/// Represents different types of input events that can occur in the application
#[derive(Debug, Clone, PartialEq)]
pub enum InputEvent {
    /// Mouse button was pressed
    PointerDown {
        location: InputLocation,
        button: PointerButton,
        modifiers: Modifiers,
    },
    /// Mouse button was released
    PointerUp {
        location: InputLocation,
        button: PointerButton,
    },
    /// Mouse moved (with or without buttons pressed)
    PointerMove {
        location: InputLocation,
        /// Buttons that are currently held down
        held_buttons: Vec<PointerButton>,
    },
    /// Primary button double click
    DoubleClick { location: InputLocation },
    /// Key was pressed
    Key { key: Key, modifiers: Modifiers },
    /// Text typed on the keyboard
    Text(String),
    /// Mouse entered the application window
    PointerEnter { location: InputLocation },
    /// Mouse left the application window
    PointerLeave { last_known_location: InputLocation },
}

const BUTTONS: [PointerButton; 3] = [
    PointerButton::Primary,
    PointerButton::Secondary,
    PointerButton::Middle,
];

/// Handles converting raw egui input into our domain-specific InputEvents
#[derive(Debug, Default)]
pub struct InputHandler {
    last_pointer_pos: Option<Pos2>,
    central_panel_rect: Option<Rect>,
    /// False while a window floats between the pointer and the canvas
    canvas_hovered: bool,
}

impl InputHandler {
    pub fn new() -> Self {
        Self::default()
    }

    /// Update the central panel rectangle and whether the canvas itself is under the pointer
    pub fn set_central_panel(&mut self, rect: Rect, hovered: bool) {
        self.central_panel_rect = Some(rect);
        self.canvas_hovered = hovered;
    }

    /// Map a screen position into canvas-local coordinates and tag its panel.
    fn make_location(&self, pos: Pos2) -> InputLocation {
        match self.central_panel_rect {
            Some(rect) => InputLocation {
                position: pos - rect.min.to_vec2(),
                panel: if self.canvas_hovered && rect.contains(pos) {
                    PanelKind::Central
                } else {
                    PanelKind::Chrome
                },
            },
            None => InputLocation {
                position: pos,
                panel: PanelKind::Chrome,
            },
        }
    }

    /// Process raw egui input and generate our InputEvents
    pub fn process_input(&mut self, ctx: &Context) -> Vec<InputEvent> {
        let mut events = Vec::new();
        // Keys belong to whichever text field has focus.
        let keyboard_taken = ctx.wants_keyboard_input();

        ctx.input(|input| {
            if let Some(pos) = input.pointer.hover_pos() {
                if self.last_pointer_pos.is_none() {
                    events.push(InputEvent::PointerEnter {
                        location: self.make_location(pos),
                    });
                }

                if Some(pos) != self.last_pointer_pos {
                    let held_buttons = BUTTONS
                        .into_iter()
                        .filter(|button| input.pointer.button_down(*button))
                        .collect();
                    events.push(InputEvent::PointerMove {
                        location: self.make_location(pos),
                        held_buttons,
                    });
                }

                self.last_pointer_pos = Some(pos);
            } else if let Some(last) = self.last_pointer_pos.take() {
                events.push(InputEvent::PointerLeave {
                    last_known_location: self.make_location(last),
                });
            }

            let pointer_pos = input.pointer.latest_pos();
            for button in BUTTONS {
                let Some(pos) = pointer_pos else { break };
                if input.pointer.button_pressed(button) {
                    events.push(InputEvent::PointerDown {
                        location: self.make_location(pos),
                        button,
                        modifiers: input.modifiers,
                    });
                }
                if input.pointer.button_double_clicked(button) && button == PointerButton::Primary {
                    events.push(InputEvent::DoubleClick {
                        location: self.make_location(pos),
                    });
                }
                // Releases count anywhere so a drag that leaves the canvas still ends.
                if input.pointer.button_released(button) {
                    events.push(InputEvent::PointerUp {
                        location: self.make_location(pos),
                        button,
                    });
                }
            }

            if keyboard_taken {
                return;
            }
            for event in &input.events {
                match event {
                    Event::Key {
                        key,
                        pressed: true,
                        modifiers,
                        ..
                    } => events.push(InputEvent::Key {
                        key: *key,
                        modifiers: *modifiers,
                    }),
                    Event::Text(text) => events.push(InputEvent::Text(text.clone())),
                    _ => {}
                }
            }
        });

        events
    }
}
