use crate::{
    error::WeatherError,
    model::{WeatherDisplay, WeatherResult},
    present::{DisplayText, present},
};

/// What a front end is showing at any moment.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum ViewState {
    #[default]
    Idle,
    Awaiting {
        city: String,
    },
    Weather(WeatherDisplay),
    Error(DisplayText),
}

impl ViewState {
    /// A query was submitted; any previous outcome is discarded.
    pub fn submit(city: impl Into<String>) -> Self {
        ViewState::Awaiting { city: city.into() }
    }

    pub fn resolve(outcome: Result<WeatherResult, WeatherError>) -> Self {
        match outcome {
            Ok(result) => ViewState::Weather(result.display()),
            Err(err) => ViewState::Error(present(&err)),
        }
    }

    pub fn is_busy(&self) -> bool {
        matches!(self, ViewState::Awaiting { .. })
    }

    /// Contents of the temperature, emoji and description slots, in that order.
    ///
    /// An error occupies the first slot and leaves the other two empty.
    pub fn slots(&self) -> [String; 3] {
        match self {
            ViewState::Idle => Default::default(),
            ViewState::Awaiting { city } => {
                [format!("Fetching weather for {city}..."), String::new(), String::new()]
            }
            ViewState::Weather(display) => [
                display.temperature.clone(),
                display.emoji.to_string(),
                display.description.clone(),
            ],
            ViewState::Error(text) => [text.to_string(), String::new(), String::new()],
        }
    }

    /// Non-empty slots, ready to print one per line.
    pub fn lines(&self) -> Vec<String> {
        self.slots().into_iter().filter(|s| !s.is_empty()).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ErrorKind;

    fn clear_sky() -> WeatherResult {
        WeatherResult {
            temperature_celsius: 26.85,
            condition_code: 800,
            description: "clear sky".into(),
        }
    }

    #[test]
    fn starts_idle_and_empty() {
        let state = ViewState::default();

        assert_eq!(state, ViewState::Idle);
        assert!(state.lines().is_empty());
        assert!(!state.is_busy());
    }

    #[test]
    fn submit_marks_busy() {
        let state = ViewState::submit("Berlin");

        assert!(state.is_busy());
        assert_eq!(state.lines(), vec!["Fetching weather for Berlin...".to_string()]);
    }

    #[test]
    fn success_fills_all_slots() {
        let state = ViewState::resolve(Ok(clear_sky()));

        assert_eq!(state.slots(), ["27°C".to_string(), "☀️".to_string(), "clear sky".to_string()]);
    }

    #[test]
    fn unknown_code_leaves_emoji_slot_empty() {
        let mut result = clear_sky();
        result.condition_code = 999;
        let state = ViewState::resolve(Ok(result));

        assert_eq!(state.slots()[1], "");
        assert_eq!(state.lines(), vec!["27°C".to_string(), "clear sky".to_string()]);
    }

    #[test]
    fn error_clears_emoji_and_description() {
        let state = ViewState::resolve(Err(WeatherError::new(ErrorKind::Unauthorized, "401")));
        let slots = state.slots();

        assert_eq!(slots[0], "Unauthorized\n------------\nInvalid API key");
        assert!(slots[1].is_empty());
        assert!(slots[2].is_empty());
    }
}
