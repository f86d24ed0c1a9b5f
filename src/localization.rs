use std::str::FromStr;

/// Language used for the notification texts
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum Locale {
    #[default]
    En,
    PtBr,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct NotificationTexts {
    pub title: &'static str,
    /// first line of the body, before the loan lines
    pub header: Option<&'static str>,
    pub due_label: &'static str,
}

impl Locale {
    pub fn texts(self) -> NotificationTexts {
        match self {
            Self::En => NotificationTexts {
                title: "Loans nearing expiration",
                header: None,
                due_label: "Due",
            },
            Self::PtBr => NotificationTexts {
                title: "Empréstimos próximos do vencimento",
                header: Some("Os seguintes empréstimos estão para finalizar:"),
                due_label: "Vence em",
            },
        }
    }
}

impl FromStr for Locale {
    type Err = ();

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().replace('_', "-").as_str() {
            "en" | "en-us" | "en-gb" => Ok(Self::En),
            "pt" | "pt-br" => Ok(Self::PtBr),
            _ => Err(()),
        }
    }
}
