/// User events posted to the winit loop from other threads.
#[derive(Debug, Clone)]
pub enum GuiEvent {
    /// The render worker has published a new event. The handler decides
    /// whether a redraw is needed.
    Wake,
}
