//! # Commands
//!
//! Subcommands of the `wio` binary and their argument parsing.

use anyhow::{anyhow, bail, Context};
use serde_json::Value;
use tracing::info;
use wio_client::WioPayments;
use wio_core::{PaymentLinkFilters, PaymentLinkRequest, PaymentRequest};

pub const USAGE: &str = "\
Usage: wio <command> [args]

Commands:
  create-payment <amount> <currency> <order_id> [description]
  payment-status <payment_id>
  session-status <session_id>
  create-link <amount> <currency> <description> [max_uses]
  link <link_id>
  links [key=value ...]

Configuration is read from WIO_API_KEY, WIO_BASE_URL, WIO_TIMEOUT_SECS, WIO_VERIFY_TLS.";

/// A parsed `wio` invocation
#[derive(Debug, Clone, PartialEq)]
pub enum Command {
    CreatePayment(PaymentRequest),
    PaymentStatus(String),
    SessionStatus(String),
    CreateLink(PaymentLinkRequest),
    Link(String),
    Links(PaymentLinkFilters),
}

impl Command {
    /// Parse arguments (without the program name)
    pub fn parse(args: &[String]) -> anyhow::Result<Self> {
        let (name, rest) = args.split_first().ok_or_else(|| anyhow!("missing command"))?;

        let command = match name.as_str() {
            "create-payment" => {
                let [amount, currency, order_id, tail @ ..] = rest else {
                    bail!("create-payment needs <amount> <currency> <order_id>");
                };
                let mut request = PaymentRequest::new(parse_amount(amount)?, currency, order_id);
                if let Some(description) = tail.first() {
                    request = request.with_description(description);
                }
                Command::CreatePayment(request)
            }
            "payment-status" => Command::PaymentStatus(single_id(rest, "payment_id")?),
            "session-status" => Command::SessionStatus(single_id(rest, "session_id")?),
            "create-link" => {
                let [amount, currency, description, tail @ ..] = rest else {
                    bail!("create-link needs <amount> <currency> <description>");
                };
                let mut request =
                    PaymentLinkRequest::new(parse_amount(amount)?, currency, description);
                if let Some(max_uses) = tail.first() {
                    let max_uses = max_uses
                        .parse()
                        .with_context(|| format!("max_uses is not a number: {}", max_uses))?;
                    request = request.with_max_uses(max_uses);
                }
                Command::CreateLink(request)
            }
            "link" => Command::Link(single_id(rest, "link_id")?),
            "links" => {
                let filters = rest
                    .iter()
                    .map(|pair| {
                        pair.split_once('=')
                            .ok_or_else(|| anyhow!("filter must be key=value: {}", pair))
                    })
                    .collect::<anyhow::Result<Vec<_>>>()?;
                Command::Links(filters.into_iter().collect())
            }
            other => bail!("unknown command: {}", other),
        };

        Ok(command)
    }

    /// Run against the gateway and return the result as JSON
    pub async fn run(&self, client: &WioPayments) -> anyhow::Result<Value> {
        let output = match self {
            Command::CreatePayment(request) => {
                let payment = client.create_payment(request).await?;
                info!("Payment created for order {}", request.order_id);
                serde_json::to_value(payment)?
            }
            Command::PaymentStatus(id) => serde_json::to_value(client.get_payment_status(id).await?)?,
            Command::SessionStatus(id) => {
                Value::Object(client.get_hosted_session_status(id).await?.raw)
            }
            Command::CreateLink(request) => Value::Object(client.create_payment_link(request).await?.raw),
            Command::Link(id) => Value::Object(client.get_payment_link(id).await?.raw),
            Command::Links(filters) => {
                let list = client.list_payment_links(filters).await?;
                info!("{} payment links", list.len());
                Value::Object(list.raw)
            }
        };
        Ok(output)
    }
}

fn parse_amount(raw: &str) -> anyhow::Result<f64> {
    raw.parse()
        .with_context(|| format!("amount is not a number: {}", raw))
}

fn single_id(rest: &[String], name: &str) -> anyhow::Result<String> {
    match rest {
        [id] => Ok(id.clone()),
        _ => bail!("expected exactly one <{}>", name),
    }
}
