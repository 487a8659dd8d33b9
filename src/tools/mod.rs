use egui::{CursorIcon, Key};

mod draft;
mod freehand;
mod tool_state;

pub use draft::{CircleTool, DragTool, LineTool, RectangleTool, TriangleTool};
pub use freehand::FreehandCapture;
pub use tool_state::{ToolAction, ToolState};

/// Every tool the toolbar offers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Tool {
    Select,
    Pen,
    Line,
    Rectangle,
    Circle,
    Triangle,
    Text,
    Image,
}

/// Tools that place something with a single click.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Placement {
    Text,
    Image,
}

/// What a pointer-down on the canvas starts for a tool.
#[derive(Clone, Copy)]
pub enum Gesture {
    Select,
    Freehand,
    Drag(&'static dyn DragTool),
    Place(Placement),
}

impl std::fmt::Debug for Gesture {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Gesture::Select => f.write_str("Select"),
            Gesture::Freehand => f.write_str("Freehand"),
            Gesture::Drag(tool) => f.debug_tuple("Drag").field(&tool.name()).finish(),
            Gesture::Place(placement) => f.debug_tuple("Place").field(placement).finish(),
        }
    }
}

/// One row of the tool table.
#[derive(Debug, Clone, Copy)]
pub struct ToolSpec {
    pub tool: Tool,
    pub name: &'static str,
    pub label: &'static str,
    pub icon: &'static str,
    pub shortcut: Option<Key>,
    pub cursor: CursorIcon,
    pub gesture: Gesture,
}

pub static TOOLS: [ToolSpec; 8] = [
    ToolSpec {
        tool: Tool::Select,
        name: "select",
        label: "Select",
        icon: "⬉",
        shortcut: Some(Key::V),
        cursor: CursorIcon::Default,
        gesture: Gesture::Select,
    },
    ToolSpec {
        tool: Tool::Pen,
        name: "pen",
        label: "Pen",
        icon: "✏",
        shortcut: Some(Key::P),
        cursor: CursorIcon::Crosshair,
        gesture: Gesture::Freehand,
    },
    ToolSpec {
        tool: Tool::Line,
        name: "line",
        label: "Line",
        icon: "╱",
        shortcut: Some(Key::L),
        cursor: CursorIcon::Crosshair,
        gesture: Gesture::Drag(&LineTool),
    },
    ToolSpec {
        tool: Tool::Rectangle,
        name: "rectangle",
        label: "Rectangle",
        icon: "▭",
        shortcut: Some(Key::R),
        cursor: CursorIcon::Crosshair,
        gesture: Gesture::Drag(&RectangleTool),
    },
    ToolSpec {
        tool: Tool::Circle,
        name: "circle",
        label: "Circle",
        icon: "○",
        shortcut: Some(Key::O),
        cursor: CursorIcon::Crosshair,
        gesture: Gesture::Drag(&CircleTool),
    },
    ToolSpec {
        tool: Tool::Triangle,
        name: "triangle",
        label: "Triangle",
        icon: "△",
        shortcut: Some(Key::D),
        cursor: CursorIcon::Crosshair,
        gesture: Gesture::Drag(&TriangleTool),
    },
    ToolSpec {
        tool: Tool::Text,
        name: "text",
        label: "Text",
        icon: "T",
        shortcut: Some(Key::T),
        cursor: CursorIcon::Crosshair,
        gesture: Gesture::Place(Placement::Text),
    },
    ToolSpec {
        tool: Tool::Image,
        name: "image",
        label: "Image",
        icon: "🖼",
        shortcut: Some(Key::I),
        cursor: CursorIcon::Crosshair,
        gesture: Gesture::Place(Placement::Image),
    },
];

impl Tool {
    pub fn spec(self) -> &'static ToolSpec {
        // The table is declared in enum order.
        &TOOLS[self as usize]
    }

    pub fn name(self) -> &'static str {
        self.spec().name
    }

    pub fn all() -> impl Iterator<Item = Tool> {
        TOOLS.iter().map(|spec| spec.tool)
    }

    /// Tool bound to a bare letter key.
    pub fn from_shortcut(key: Key) -> Option<Tool> {
        TOOLS
            .iter()
            .find(|spec| spec.shortcut == Some(key))
            .map(|spec| spec.tool)
    }
}

impl std::fmt::Display for Tool {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn table_is_in_enum_order() {
        for (index, spec) in TOOLS.iter().enumerate() {
            assert_eq!(spec.tool as usize, index, "{}", spec.name);
            assert_eq!(spec.tool.spec().name, spec.name);
        }
    }

    #[test]
    fn shortcuts_are_unique() {
        let keys: HashSet<Key> = TOOLS.iter().filter_map(|spec| spec.shortcut).collect();
        assert_eq!(keys.len(), TOOLS.len());
    }

    #[test]
    fn shortcut_lookup() {
        assert_eq!(Tool::from_shortcut(Key::R), Some(Tool::Rectangle));
        assert_eq!(Tool::from_shortcut(Key::O), Some(Tool::Circle));
        assert_eq!(Tool::from_shortcut(Key::D), Some(Tool::Triangle));
        assert_eq!(Tool::from_shortcut(Key::Z), None);
    }

    #[test]
    fn only_select_uses_default_cursor() {
        for tool in Tool::all() {
            let crosshair = tool.spec().cursor == CursorIcon::Crosshair;
            assert_eq!(crosshair, tool != Tool::Select, "{tool}");
        }
    }
}
