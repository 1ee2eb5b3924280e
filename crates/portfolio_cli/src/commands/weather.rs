use tabled::Tabled;

use portfolio::weather::{WeatherClient, WeatherData};

use crate::commands::output::{OutputFormat, print_json, table};
use crate::config::Config;

#[derive(Debug, Clone, Tabled)]
pub(crate) struct WeatherRow {
    #[tabled(rename = "Location")]
    pub location: String,
    #[tabled(rename = "Temperature")]
    pub temperature: String,
    #[tabled(rename = "Time")]
    pub time: String,
    #[tabled(rename = "Icon")]
    pub icon: String,
}

impl WeatherRow {
    pub(crate) fn from_data(data: &WeatherData) -> Self {
        Self {
            location: data.location.clone(),
            temperature: format!("{:.0}°C", data.temperature),
            time: data.time.clone(),
            icon: absolute_icon_url(&data.weather_icon),
        }
    }
}

/// weatherapi.com returns protocol-relative icon URLs.
fn absolute_icon_url(icon: &str) -> String {
    match icon.strip_prefix("//") {
        Some(rest) => format!("https://{rest}"),
        None => icon.to_string(),
    }
}

pub(crate) async fn handle_weather(
    location: Option<String>,
    output: OutputFormat,
    config: &Config,
) -> Result<(), Box<dyn std::error::Error>> {
    let client = WeatherClient::new(config.weather_key(), config.http_timeout())?
        .with_api_url(config.weather.api_url.clone());
    let location = location.unwrap_or_else(|| config.weather.location.clone());

    let response = client.current(&location).await;

    match output {
        OutputFormat::Json => print_json(&response)?,
        OutputFormat::Table => match (&response.data, &response.error) {
            (Some(data), _) => println!("{}", table([WeatherRow::from_data(data)])),
            (None, Some(error)) => return Err(error.clone().into()),
            (None, None) => {}
        },
    }

    Ok(())
}
