use egui::{Context, PointerButton, Pos2, Response};

/// Represents the location where an input event occurred
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct InputLocation {
    /// Position relative to the canvas' top-left corner, in screen units
    /// (still multiplied by the view scale)
    pub position: Pos2,
}

/// Canvas input, already reduced to what the tool controller understands
#[derive(Debug, Clone, PartialEq)]
pub enum InputEvent {
    /// Primary button went down on the canvas
    PointerDown { location: InputLocation },
    /// Pointer moved while the primary button is held
    PointerMove { location: InputLocation },
    /// Primary button was released after a drag
    PointerUp { location: InputLocation },
    /// Scroll with Ctrl/Cmd held over the canvas
    Zoom { zoom_in: bool },
}

/// Turns the canvas widget's egui response into [`InputEvent`]s
#[derive(Debug, Default)]
pub struct InputHandler {
    /// Last pointer position seen during the current drag (absolute)
    last_pointer_pos: Option<Pos2>,
    dragging: bool,
}

impl InputHandler {
    pub fn new() -> Self {
        Self::default()
    }

    fn make_location(response: &Response, pos: Pos2) -> InputLocation {
        InputLocation {
            position: (pos - response.rect.min).to_pos2(),
        }
    }

    /// Process this frame's input for the canvas widget
    pub fn process_input(&mut self, ctx: &Context, response: &Response) -> Vec<InputEvent> {
        let mut events = Vec::new();

        if response.hovered() {
            ctx.input(|input| {
                for event in &input.raw.events {
                    if let egui::Event::MouseWheel { delta, modifiers, .. } = event {
                        if (modifiers.ctrl || modifiers.command) && delta.y != 0.0 {
                            events.push(InputEvent::Zoom {
                                zoom_in: delta.y > 0.0,
                            });
                        }
                    }
                }
            });
        }

        let current = response
            .interact_pointer_pos()
            .or_else(|| ctx.input(|i| i.pointer.latest_pos()));

        if response.drag_started_by(PointerButton::Primary) {
            // the drag is only recognised after some movement; start where the button went down
            let origin = ctx.input(|i| i.pointer.press_origin()).or(current);
            if let Some(pos) = origin {
                events.push(InputEvent::PointerDown {
                    location: Self::make_location(response, pos),
                });
                self.dragging = true;
                self.last_pointer_pos = Some(pos);
            }
        }

        if self.dragging && response.dragged_by(PointerButton::Primary) {
            if let Some(pos) = current {
                if Some(pos) != self.last_pointer_pos {
                    events.push(InputEvent::PointerMove {
                        location: Self::make_location(response, pos),
                    });
                    self.last_pointer_pos = Some(pos);
                }
            }
        }

        if self.dragging && response.drag_stopped_by(PointerButton::Primary) {
            if let Some(pos) = current.or(self.last_pointer_pos) {
                events.push(InputEvent::PointerUp {
                    location: Self::make_location(response, pos),
                });
            }
            self.dragging = false;
            self.last_pointer_pos = None;
        }

        events
    }
}
