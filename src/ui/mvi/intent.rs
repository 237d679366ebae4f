/// Marker for user or system events consumed by a [`Reducer`](super::Reducer).
pub trait Intent: Send + 'static {}
