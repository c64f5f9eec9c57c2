use anyhow::{anyhow, Result};
use clap::Args;
use ticketdesk_client::{ApiClient, Method, RequestOptions};

#[derive(Args)]
pub struct FetchSubCommand {
    /// Endpoint, appended to the base address as is
    endpoint: String,
    /// HTTP method, case-insensitive
    #[arg(short = 'X', long, default_value = "GET", value_parser = parse_method)]
    method: Method,
    /// JSON request body
    #[arg(short, long)]
    data: Option<String>,
    /// Extra header as `Name: value`, may be repeated
    #[arg(short = 'H', long = "header")]
    headers: Vec<String>,
}

fn parse_method(raw: &str) -> Result<Method> {
    Ok(Method::from_bytes(raw.trim().to_ascii_uppercase().as_bytes())?)
}

fn parse_header(raw: &str) -> Result<(String, String)> {
    let (name, value) = raw
        .split_once(':')
        .ok_or(anyhow!("Header must look like `Name: value`: {}", raw))?;
    Ok((name.trim().to_string(), value.trim().to_string()))
}

pub async fn fetch(client: &ApiClient, sub_command_args: &FetchSubCommand) -> Result<()> {
    let headers = sub_command_args
        .headers
        .iter()
        .map(|raw| parse_header(raw))
        .collect::<Result<Vec<_>>>()?;

    let mut options = RequestOptions::new()
        .method(sub_command_args.method.clone())
        .headers(headers);

    if let Some(data) = &sub_command_args.data {
        let body: serde_json::Value = serde_json::from_str(data)?;
        options = options.json(&body)?;
    }

    let response: serde_json::Value = client
        .api_fetch(&sub_command_args.endpoint, Some(options))
        .await?;

    println!("{}", serde_json::to_string_pretty(&response)?);

    Ok(())
}
