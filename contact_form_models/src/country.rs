/// Calling code preselected in the country selector.
pub const DEFAULT_COUNTRY_CODE: &str = "+54";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Country {
    pub flag: &'static str,
    pub code: &'static str,
    pub name: &'static str,
}

/// Countries offered by the calling code selector, in display order.
///
/// Codes are not unique (e.g. `+1`), so entries should be identified by name
/// and code together.
pub static COUNTRIES: &[Country] = &[
    country("🇦🇷", "+54", "Argentina"),
    country("🇧🇴", "+591", "Bolivia"),
    country("🇧🇷", "+55", "Brasil"),
    country("🇨🇱", "+56", "Chile"),
    country("🇨🇴", "+57", "Colombia"),
    country("🇨🇷", "+506", "Costa Rica"),
    country("🇨🇺", "+53", "Cuba"),
    country("🇪🇨", "+593", "Ecuador"),
    country("🇸🇻", "+503", "El Salvador"),
    country("🇬🇹", "+502", "Guatemala"),
    country("🇭🇳", "+504", "Honduras"),
    country("🇲🇽", "+52", "México"),
    country("🇳🇮", "+505", "Nicaragua"),
    country("🇵🇦", "+507", "Panamá"),
    country("🇵🇾", "+595", "Paraguay"),
    country("🇵🇪", "+51", "Perú"),
    country("🇵🇷", "+1", "Puerto Rico"),
    country("🇩🇴", "+1", "República Dominicana"),
    country("🇺🇾", "+598", "Uruguay"),
    country("🇻🇪", "+58", "Venezuela"),
    country("🇪🇸", "+34", "España"),
    country("🇺🇸", "+1", "Estados Unidos"),
    country("🇨🇦", "+1", "Canadá"),
    country("🇬🇧", "+44", "Reino Unido"),
    country("🇩🇪", "+49", "Alemania"),
    country("🇫🇷", "+33", "Francia"),
    country("🇮🇹", "+39", "Italia"),
];

const fn country(flag: &'static str, code: &'static str, name: &'static str) -> Country {
    Country { flag, code, name }
}

/// Returns the first country using the given calling code.
pub fn find_by_code(code: &str) -> Option<&'static Country> {
    COUNTRIES.iter().find(|country| country.code == code)
}
