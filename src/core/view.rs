use crate::core::message::ChatMessage;

/// The surface a [`ChatWidget`](crate::core::widget::ChatWidget) drives.
///
/// A view owns a text input and a transcript panel. The TUI and the headless
/// line printer both implement it, so the controller never knows which one
/// it is talking to.
pub trait ChatView {
    /// Current contents of the text input.
    fn input_value(&self) -> String;

    /// Empties the text input.
    fn clear_input(&mut self);

    /// Appends one message to the end of the transcript.
    fn append_message(&mut self, message: ChatMessage);

    /// Moves the transcript to its maximum scroll offset.
    fn scroll_to_end(&mut self);
}
