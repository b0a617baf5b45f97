//! Company branding from tenant settings.

use crate::document::Branding;
use crate::format::{combine_city_state_postal, non_empty};
use crate::schemas::present_lines;
use serde::{Deserialize, Serialize};

/// Tenant company details shown in document headers.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CompanyDetails {
    /// Street line 1
    pub address1: Option<String>,
    /// Street line 2
    pub address2: Option<String>,
    /// City
    pub city: Option<String>,
    /// State or region
    pub state: Option<String>,
    /// Postal code
    pub postal_code: Option<String>,
    /// Country
    pub country: Option<String>,
    /// Phone number
    pub phone: Option<String>,
    /// Contact email
    pub email: Option<String>,
    /// Tax registration number
    pub tax_id: Option<String>,
    /// Label printed before the tax id; `Tax ID` when unset
    pub tax_id_label: Option<String>,
}

/// Assemble header branding. Returns `None` when nothing would be drawn.
pub fn build_company_branding(
    company_name: Option<&str>,
    details: &CompanyDetails,
) -> Option<Branding> {
    let address_lines = present_lines(vec![
        non_empty(details.address1.as_deref()),
        non_empty(details.address2.as_deref()),
        combine_city_state_postal(
            details.city.as_deref(),
            details.state.as_deref(),
            details.postal_code.as_deref(),
        ),
        non_empty(details.country.as_deref()),
    ]);

    let tax_line = non_empty(details.tax_id.as_deref()).map(|tax_id| {
        let label = non_empty(details.tax_id_label.as_deref()).unwrap_or_else(|| "Tax ID".to_string());
        format!("{}: {}", label, tax_id)
    });
    let contact_lines = present_lines(vec![
        non_empty(details.phone.as_deref()).map(|phone| format!("Phone: {}", phone)),
        non_empty(details.email.as_deref()),
        tax_line,
    ]);

    let branding = Branding {
        company_name: non_empty(company_name),
        address_lines,
        contact_lines,
    };
    (!branding.is_empty()).then_some(branding)
}
