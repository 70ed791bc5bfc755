use crate::placeholders::fill;

pub const INVITE_SUBJECT: &str = "📝 Votre dossier de compétences vous attend sur SkillForge";

pub fn validation_subject(candidate_name: &str) -> String {
    format!("✅ Dossier de compétences validé - {candidate_name}")
}

const INVITE_TEMPLATE: &str = r#"<!DOCTYPE html>
<html lang="fr">
<head>
  <meta charset="UTF-8">
  <title>Votre dossier de compétences</title>
</head>
<body style="font-family: Arial, sans-serif; background-color: #f5f7fa; margin: 0; padding: 24px;">
  <div style="max-width: 600px; margin: 0 auto; background: #ffffff; border-radius: 8px; padding: 32px;">
    <h1 style="color: #1f2937; font-size: 22px;">Bonjour,</h1>
    <p style="color: #374151; line-height: 1.6;">
      <strong>{inviter_email}</strong> vous invite à compléter votre dossier de compétences sur SkillForge.
    </p>
    <p style="color: #374151; line-height: 1.6;">
      Votre CV a déjà été analysé : il ne vous reste qu'à vérifier les informations et à valider votre dossier.
    </p>
    <p style="text-align: center; margin: 32px 0;">
      <a href="{candidate_link}" style="background-color: #4f46e5; color: #ffffff; padding: 14px 28px; border-radius: 6px; text-decoration: none; font-weight: bold;">
        Compléter mon dossier
      </a>
    </p>
    <p style="color: #6b7280; font-size: 13px;">
      Si le bouton ne fonctionne pas, copiez ce lien dans votre navigateur :<br>
      <a href="{candidate_link}" style="color: #4f46e5;">{candidate_link}</a>
    </p>
    <hr style="border: none; border-top: 1px solid #e5e7eb; margin: 24px 0;">
    <p style="color: #9ca3af; font-size: 12px;">L'équipe SkillForge</p>
  </div>
</body>
</html>"#;

const VALIDATION_TEMPLATE: &str = r#"<!DOCTYPE html>
<html lang="fr">
<head>
  <meta charset="UTF-8">
  <title>Dossier de compétences validé</title>
</head>
<body style="font-family: Arial, sans-serif; background-color: #f5f7fa; margin: 0; padding: 24px;">
  <div style="max-width: 600px; margin: 0 auto; background: #ffffff; border-radius: 8px; padding: 32px;">
    <h1 style="color: #15803d; font-size: 22px;">Dossier validé à 100%</h1>
    <p style="color: #374151; line-height: 1.6;">
      <strong>{candidate_name}</strong> a finalisé et validé son dossier de compétences.
    </p>
    <table style="width: 100%; border-collapse: collapse; margin: 24px 0; color: #374151;">
      <tr>
        <td style="padding: 8px 0; font-weight: bold;">Candidat</td>
        <td style="padding: 8px 0;">{candidate_name}</td>
      </tr>
      <tr>
        <td style="padding: 8px 0; font-weight: bold;">Email</td>
        <td style="padding: 8px 0;">{candidate_email}</td>
      </tr>
      <tr>
        <td style="padding: 8px 0; font-weight: bold;">Organisation</td>
        <td style="padding: 8px 0;">{organization_name}</td>
      </tr>
      <tr>
        <td style="padding: 8px 0; font-weight: bold;">Validé le</td>
        <td style="padding: 8px 0;">{validation_date}</td>
      </tr>
    </table>
    <p style="text-align: center; margin: 32px 0;">
      <a href="{dossier_url}" style="background-color: #15803d; color: #ffffff; padding: 14px 28px; border-radius: 6px; text-decoration: none; font-weight: bold;">
        Consulter le dossier
      </a>
    </p>
    <hr style="border: none; border-top: 1px solid #e5e7eb; margin: 24px 0;">
    <p style="color: #9ca3af; font-size: 12px;">L'équipe SkillForge</p>
  </div>
</body>
</html>"#;

pub fn render_invite(inviter_email: &str, candidate_link: &str) -> String {
    render(
        INVITE_TEMPLATE,
        &[
            ("inviter_email", inviter_email),
            ("candidate_link", candidate_link),
        ],
    )
}

pub struct ValidationFields<'a> {
    pub candidate_name: &'a str,
    pub candidate_email: &'a str,
    pub organization_name: &'a str,
    pub validation_date: &'a str,
    pub dossier_url: &'a str,
}

pub fn render_validation(fields: &ValidationFields<'_>) -> String {
    render(
        VALIDATION_TEMPLATE,
        &[
            ("candidate_name", fields.candidate_name),
            ("candidate_email", fields.candidate_email),
            ("organization_name", fields.organization_name),
            ("validation_date", fields.validation_date),
            ("dossier_url", fields.dossier_url),
        ],
    )
}

/// Substitutes `{key}` placeholders with HTML-escaped values.
fn render(template: &str, values: &[(&str, &str)]) -> String {
    let escaped: Vec<(&str, String)> = values
        .iter()
        .map(|(key, value)| (*key, html_escape(value)))
        .collect();
    fill(template, &escaped)
}

pub fn html_escape(value: &str) -> String {
    let mut out = String::with_capacity(value.len());
    for c in value.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            _ => out.push(c),
        }
    }
    out
}
