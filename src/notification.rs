use chrono::{DateTime, Utc};
use uuid::Uuid;

use crate::models::{DerivedAttributes, SanitizedLead};

/// A rendered notification ready for the email service.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EmailMessage {
    pub subject: String,
    pub html: String,
}

/// Everything a lead notification shows.
#[derive(Debug, Clone)]
pub struct LeadNotification<'a> {
    pub lead: &'a SanitizedLead,
    pub derived: &'a DerivedAttributes,
    /// Absent when the lead was not stored.
    pub lead_id: Option<Uuid>,
    pub reference_number: &'a str,
    /// Leads stored before this one, when the count query succeeded.
    pub lead_count: Option<i64>,
    pub submitted_at: DateTime<Utc>,
}

impl LeadNotification<'_> {
    pub fn subject(&self) -> String {
        format!(
            "New Shipping Lead #{}: {} Quote Request",
            self.lead_number(),
            self.lead.country
        )
    }

    /// Position of this lead in the running total, or "N/A".
    fn lead_number(&self) -> String {
        self.lead_count
            .map(|count| (count + 1).to_string())
            .unwrap_or_else(|| "N/A".to_string())
    }

    pub fn render(&self) -> EmailMessage {
        let lead = self.lead;
        let monthly_shipments = if lead.monthly_shipments > 0 {
            lead.monthly_shipments.to_string()
        } else {
            "Not specified".to_string()
        };
        let additional_info = if lead.additional_info.is_empty() {
            "None provided".to_string()
        } else {
            html_escape::encode_text(&lead.additional_info).into_owned()
        };
        let contact_method = if lead.contact_method.is_empty() {
            String::new()
        } else {
            format!(
                "\n        <li><strong>Preferred Contact:</strong> {}</li>",
                html_escape::encode_text(&lead.contact_method)
            )
        };
        let lead_id = self
            .lead_id
            .map(|id| id.to_string())
            .unwrap_or_else(|| "N/A".to_string());

        let html = format!(
            r#"
      <h2>New Shipping Quote Request</h2>
      <p>A new lead has been submitted through the app:</p>

      <h3>Contact Information:</h3>
      <ul>
        <li><strong>Name:</strong> {name}</li>
        <li><strong>Email:</strong> {email}</li>
        <li><strong>Phone:</strong> {phone}</li>
        <li><strong>Company:</strong> {company}</li>{contact_method}
      </ul>

      <h3>Business Details:</h3>
      <ul>
        <li><strong>Business Type:</strong> {business_type}</li>
        <li><strong>Country:</strong> {country}</li>
        <li><strong>Package Type:</strong> {package_type}</li>
        <li><strong>Shipping Method:</strong> {shipping_method}</li>
        <li><strong>Monthly Shipments:</strong> {monthly_shipments}</li>
      </ul>

      <h3>Additional Information:</h3>
      <p>{additional_info}</p>

      <p>This lead was submitted on {submitted_at} and has been saved to the database with ID: {lead_id}</p>
      <p><strong>Reference Number:</strong> {reference_number}</p>
      <p><strong>Total Leads Count:</strong> {lead_number}</p>
    "#,
            name = html_escape::encode_text(&lead.name),
            email = html_escape::encode_text(&lead.email),
            phone = html_escape::encode_text(&lead.phone),
            company = html_escape::encode_text(&lead.company),
            contact_method = contact_method,
            business_type = html_escape::encode_text(&lead.business_type),
            country = html_escape::encode_text(&lead.country),
            package_type = self.derived.package_type,
            shipping_method = self.derived.shipping_method,
            monthly_shipments = monthly_shipments,
            additional_info = additional_info,
            submitted_at = self.submitted_at.format("%Y-%m-%d %H:%M:%S UTC"),
            lead_id = lead_id,
            reference_number = html_escape::encode_text(self.reference_number),
            lead_number = self.lead_number(),
        );

        EmailMessage {
            subject: self.subject(),
            html,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::lead_intake::derive_attributes;

    fn sample_lead() -> SanitizedLead {
        SanitizedLead {
            name: "Ana Lim".into(),
            email: "ana@example.com".into(),
            phone: "+65 9123 4567".into(),
            company: "Lim <Trading> & Co".into(),
            business_type: "Retail".into(),
            country: "Malaysia".into(),
            additional_info: String::new(),
            contact_method: "WhatsApp".into(),
            monthly_shipments: 0,
        }
    }

    #[test]
    fn test_subject_uses_next_lead_number() {
        let lead = sample_lead();
        let derived = derive_attributes(&lead);
        let mut notification = LeadNotification {
            lead: &lead,
            derived: &derived,
            lead_id: None,
            reference_number: "EST12345678",
            lead_count: Some(41),
            submitted_at: Utc::now(),
        };

        assert_eq!(
            notification.subject(),
            "New Shipping Lead #42: Malaysia Quote Request"
        );

        notification.lead_count = None;
        assert_eq!(
            notification.subject(),
            "New Shipping Lead #N/A: Malaysia Quote Request"
        );
    }

    #[test]
    fn test_render_body() {
        let lead = sample_lead();
        let derived = derive_attributes(&lead);
        let id = Uuid::new_v4();
        let message = LeadNotification {
            lead: &lead,
            derived: &derived,
            lead_id: Some(id),
            reference_number: "EST12345678",
            lead_count: Some(9),
            submitted_at: Utc::now(),
        }
        .render();

        assert!(message.html.contains("Lim &lt;Trading&gt; &amp; Co"));
        assert!(message.html.contains("<strong>Package Type:</strong> medium"));
        assert!(message.html.contains("<strong>Shipping Method:</strong> air"));
        assert!(message.html.contains("<strong>Monthly Shipments:</strong> Not specified"));
        assert!(message.html.contains("None provided"));
        assert!(message.html.contains("Preferred Contact:</strong> WhatsApp"));
        assert!(message.html.contains(&id.to_string()));
        assert!(message.html.contains("<strong>Total Leads Count:</strong> 10"));
    }

    #[test]
    fn test_render_without_store() {
        let lead = SanitizedLead {
            contact_method: String::new(),
            monthly_shipments: 1200,
            ..sample_lead()
        };
        let derived = derive_attributes(&lead);
        let message = LeadNotification {
            lead: &lead,
            derived: &derived,
            lead_id: None,
            reference_number: "EST00000001",
            lead_count: None,
            submitted_at: Utc::now(),
        }
        .render();

        assert!(message.html.contains("with ID: N/A"));
        assert!(message.html.contains("<strong>Monthly Shipments:</strong> 1200"));
        assert!(!message.html.contains("Preferred Contact"));
    }
}
