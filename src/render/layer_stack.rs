use serde::{Deserialize, Serialize};

/// Draw layers of one chart frame, listed bottom to top.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum CanvasLayerKind {
    Grid,
    Fill,
    Series,
    Marker,
    Label,
    Legend,
    Overlay,
}

impl CanvasLayerKind {
    /// Canonical paint order shared by every renderer.
    pub const CANONICAL: [CanvasLayerKind; 7] = [
        CanvasLayerKind::Grid,
        CanvasLayerKind::Fill,
        CanvasLayerKind::Series,
        CanvasLayerKind::Marker,
        CanvasLayerKind::Label,
        CanvasLayerKind::Legend,
        CanvasLayerKind::Overlay,
    ];

    #[must_use]
    pub fn paint_index(self) -> usize {
        match self {
            CanvasLayerKind::Grid => 0,
            CanvasLayerKind::Fill => 1,
            CanvasLayerKind::Series => 2,
            CanvasLayerKind::Marker => 3,
            CanvasLayerKind::Label => 4,
            CanvasLayerKind::Legend => 5,
            CanvasLayerKind::Overlay => 6,
        }
    }
}
