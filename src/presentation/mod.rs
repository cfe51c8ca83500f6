// Presentation layer - Hands label frames to the rendering surface
pub mod sink;
