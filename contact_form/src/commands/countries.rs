use std::io::Write;

use contact_form_config::Config;
use contact_form_models::country::COUNTRIES;

use crate::render;

/// Lists the selectable country calling codes, marking the default one.
pub fn invoke(config: &Config, out: &mut impl Write) -> anyhow::Result<()> {
    for country in COUNTRIES {
        writeln!(
            out,
            "{}",
            render::country(country, &config.form.default_country_code)
        )?;
    }
    Ok(())
}
