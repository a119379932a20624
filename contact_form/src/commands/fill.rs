use std::io::Write;

use anyhow::bail;
use contact_form_config::Config;
use contact_form_core_contracts::{ContactFormService, SubmitOutcome};
use contact_form_models::{country::find_by_code, form::FormField};
use tokio::io::{AsyncBufRead, AsyncBufReadExt, BufReader};

use super::{print_status, submit_and_watch};
use crate::{environment, render};

/// Fills in the form interactively on stdin and submits it.
pub async fn invoke(config: Config) -> anyhow::Result<()> {
    let form = environment::mount(&config)?;
    let input = BufReader::new(tokio::io::stdin());
    let result = run(&form, input, &mut std::io::stdout()).await;
    form.unmount();
    result
}

/// Prompts for every field, then re-prompts only the invalid ones until the
/// form is sent or the user gives up retrying.
///
/// An empty answer keeps the current country code, an unknown one is asked
/// again.
async fn run(
    form: &impl ContactFormService,
    input: impl AsyncBufRead + Unpin,
    out: &mut impl Write,
) -> anyhow::Result<()> {
    let mut lines = input.lines();
    let mut pending = FormField::ALL.to_vec();

    loop {
        for field in pending.drain(..) {
            loop {
                write!(out, "{}", render::prompt(field, &form.snapshot()?))?;
                out.flush()?;
                let Some(line) = lines.next_line().await? else {
                    bail!("Input closed before the form was sent");
                };
                if field == FormField::CountryCode {
                    let code = line.trim();
                    if code.is_empty() {
                        break;
                    }
                    if find_by_code(code).is_none() {
                        writeln!(out, "  Código de país desconocido: {code}")?;
                        continue;
                    }
                    form.set_field(field, code.into())?;
                } else {
                    form.set_field(field, line)?;
                }
                break;
            }
        }

        match submit_and_watch(form, out).await? {
            SubmitOutcome::Sent => return print_status(form, out),
            SubmitOutcome::Invalid(errors) => {
                writeln!(out, "Revisá los siguientes campos:")?;
                write!(out, "{}", render::field_errors(&errors))?;
                pending = errors.iter().map(|(field, _)| field).collect();
            }
            SubmitOutcome::Failed => {
                print_status(form, out)?;
                write!(out, "¿Reintentar? [S/n]: ")?;
                out.flush()?;
                let answer = lines.next_line().await?.unwrap_or_default();
                if !matches!(answer.trim().to_lowercase().as_str(), "" | "s" | "si" | "sí") {
                    bail!("The message could not be delivered");
                }
                form.retry()?;
            }
            SubmitOutcome::Rejected(status) => {
                bail!("The form does not accept submissions while {status}")
            }
            SubmitOutcome::Discarded => bail!("The form was unmounted before the webhook responded"),
        }
    }
}
