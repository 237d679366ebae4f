/// Marker for reducer-owned UI state.
///
/// Values are replaced wholesale on every intent, so they must be cheap to
/// clone and comparable for change detection.
pub trait UiState: Clone + PartialEq + Default + Send + 'static {}
