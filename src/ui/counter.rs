use crate::ui::mvi::{Intent, Reducer, UiState};

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct CounterState {
    pub count: i64,
}

impl UiState for CounterState {}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CounterIntent {
    Increment,
    Decrement,
    Reset,
}

impl Intent for CounterIntent {}

pub struct CounterReducer;

impl Reducer for CounterReducer {
    type State = CounterState;
    type Intent = CounterIntent;

    fn reduce(state: Self::State, intent: Self::Intent) -> Self::State {
        match intent {
            CounterIntent::Increment => CounterState {
                count: state.count.saturating_add(1),
            },
            CounterIntent::Decrement => CounterState {
                count: state.count.saturating_sub(1),
            },
            CounterIntent::Reset => CounterState::default(),
        }
    }
}
