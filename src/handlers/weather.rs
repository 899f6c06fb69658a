//! Weather report handler

use async_trait::async_trait;

use super::{joined, ActionHandler, Flow, HandlerContext};
use crate::{Error, Result};

/// OpenWeatherMap current-weather payload, trimmed to the spoken fields
#[derive(serde::Deserialize)]
struct WeatherResponse {
    weather: Vec<Condition>,
    main: MainData,
    wind: Wind,
}

#[derive(serde::Deserialize)]
struct Condition {
    description: String,
}

#[derive(serde::Deserialize)]
struct MainData {
    temp: f32,
    pressure: f32,
}

#[derive(serde::Deserialize)]
struct Wind {
    speed: f32,
}

/// Hectopascals to millimeters of mercury
#[allow(clippy::cast_possible_truncation)]
fn hpa_to_mmhg(pressure: f32) -> i32 {
    (pressure / 1.333) as i32
}

/// Reads the current weather for a city aloud
///
/// With no spoken city, reports for the owner's home city.
pub struct WeatherHandler;

#[async_trait(?Send)]
impl ActionHandler for WeatherHandler {
    async fn invoke(&self, ctx: &mut HandlerContext<'_>, args: &[String]) -> Result<Flow> {
        let city = joined(args).unwrap_or_else(|| ctx.owner.home_city.clone());

        let api_key = ctx.api_keys.weather.as_deref().ok_or_else(|| {
            Error::Config("WEATHER_API_KEY required for weather reports".to_string())
        })?;

        let language_code = ctx.state.speech_language().code();
        tracing::info!(%city, language = language_code, "weather lookup");

        let response = ctx
            .http
            .get("https://api.openweathermap.org/data/2.5/weather")
            .query(&[
                ("q", city.as_str()),
                ("appid", api_key),
                ("units", "metric"),
                ("lang", language_code),
            ])
            .send()
            .await
            .map_err(|e| Error::Handler(format!("weather request failed: {e}")))?;

        if !response.status().is_success() {
            return Err(Error::Handler(format!(
                "weather API error {} for city '{city}'",
                response.status()
            )));
        }

        let report: WeatherResponse = response
            .json()
            .await
            .map_err(|e| Error::Handler(format!("failed to parse weather response: {e}")))?;

        let description = report
            .weather
            .first()
            .map_or("unknown", |c| c.description.as_str());
        let mmhg = hpa_to_mmhg(report.main.pressure);

        tracing::info!(
            %city,
            description,
            temp = report.main.temp,
            wind = report.wind.speed,
            pressure_mmhg = mmhg,
            "weather received"
        );

        let voice = ctx.state.voice_id();
        ctx.speech
            .say(&format!("It is {description} in {city}"), voice)
            .await?;
        ctx.speech
            .say(
                &format!("The temperature is {:.0} degrees Celsius", report.main.temp),
                voice,
            )
            .await?;
        ctx.speech
            .say(
                &format!("The wind speed is {:.0} meters per second", report.wind.speed),
                voice,
            )
            .await?;
        ctx.speech
            .say(
                &format!("The pressure is {mmhg} millimeters of mercury"),
                voice,
            )
            .await?;

        Ok(Flow::Continue)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_pressure_conversion() {
        // Standard atmosphere: 1013 hPa is about 760 mmHg
        assert_eq!(hpa_to_mmhg(1013.0), 759);
        assert_eq!(hpa_to_mmhg(0.0), 0);
    }
}
