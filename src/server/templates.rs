//! Embedded page template
//!
//! One template serves all four states (home, post-train, post-predict,
//! error); the handlers only vary the context message.

use crate::schema::{CATEGORICAL_FIELDS, NUMERIC_FIELDS};

const CONTEXT_SLOT: &str = "{{context}}";

const INDEX_TEMPLATE: &str = r#"<!DOCTYPE html>
<html lang="en">
<head>
  <meta charset="utf-8">
  <meta name="viewport" content="width=device-width, initial-scale=1">
  <title>ChurnCast</title>
  <link rel="stylesheet" href="/static/style.css">
</head>
<body>
  <header>
    <h1>ChurnCast</h1>
    <p class="tagline">Customer churn prediction</p>
  </header>

  <section class="context">{{context}}</section>

  <nav>
    <a class="button" href="/train">Train model</a>
  </nav>

  <form method="post" action="/">
    <fieldset>
      <legend>Customer profile</legend>
      {{numeric_inputs}}
    </fieldset>
    <fieldset>
      <legend>Preferences</legend>
      {{categorical_inputs}}
    </fieldset>
    <button type="submit">Predict churn</button>
  </form>
</body>
</html>
"#;

/// Options offered for each categorical field, mirroring the values present
/// in the training dataset.
const CATEGORICAL_OPTIONS: [(&str, &[&str]); 5] = [
    ("Gender", &["Male", "Female"]),
    (
        "PreferedOrderCat",
        &["Laptop & Accessory", "Mobile Phone", "Fashion", "Grocery", "Others"],
    ),
    ("MaritalStatus", &["Single", "Married", "Divorced"]),
    ("PreferredLoginDevice", &["Mobile Phone", "Computer"]),
    (
        "PreferredPaymentMode",
        &["Debit Card", "Credit Card", "E wallet", "UPI", "Cash on Delivery"],
    ),
];

/// Render the index page with the given context message
pub fn render_index(context: &str) -> String {
    INDEX_TEMPLATE
        .replace(CONTEXT_SLOT, &escape_html(context))
        .replace("{{numeric_inputs}}", &numeric_inputs())
        .replace("{{categorical_inputs}}", &categorical_inputs())
}

fn numeric_inputs() -> String {
    NUMERIC_FIELDS
        .iter()
        .map(|name| {
            format!(
                "<label>{name}<input type=\"number\" step=\"any\" name=\"{name}\" required></label>\n"
            )
        })
        .collect()
}

fn categorical_inputs() -> String {
    CATEGORICAL_FIELDS
        .iter()
        .map(|name| {
            let options = CATEGORICAL_OPTIONS
                .iter()
                .find(|(field, _)| field == name)
                .map(|(_, options)| *options)
                .unwrap_or(&[]);
            let rendered: String = options
                .iter()
                .map(|option| {
                    let escaped = escape_html(option);
                    format!("<option value=\"{escaped}\">{escaped}</option>")
                })
                .collect();
            format!("<label>{name}<select name=\"{name}\">{rendered}</select></label>\n")
        })
        .collect()
}

/// Minimal HTML escaping for text interpolated into the page
pub fn escape_html(raw: &str) -> String {
    raw.chars()
        .map(|c| match c {
            '&' => "&amp;".to_string(),
            '<' => "&lt;".to_string(),
            '>' => "&gt;".to_string(),
            '"' => "&quot;".to_string(),
            '\'' => "&#39;".to_string(),
            other => other.to_string(),
        })
        .collect()
}
