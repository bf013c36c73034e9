//! Plain-text list and detail views.
//!
//! Optional parts of a user are rendered only when present; nothing here
//! assumes `phone`, `website`, `address`, `geo` or `company` exist.

use users_core::{Address, Company, User};

pub fn user_list(users: &[User]) -> String {
    if users.is_empty() {
        return "No users found.".to_string();
    }

    let id_width = users.iter().map(|u| u.id.to_string().len()).max().unwrap_or(1);
    let name_width = users.iter().map(|u| u.name.chars().count()).max().unwrap_or(0);
    let handle_width = users.iter().map(|u| u.username.chars().count() + 1).max().unwrap_or(0);

    users
        .iter()
        .map(|u| {
            let line = format!(
                "#{:<id_width$}  {:<name_width$}  {:<handle_width$}  {}",
                u.id,
                u.name,
                format!("@{}", u.username),
                u.email,
            );
            line.trim_end().to_string()
        })
        .collect::<Vec<_>>()
        .join("\n")
}

pub fn user_detail(user: &User) -> String {
    let mut sections = vec![format!("{}\n@{}", user.name, user.username)];

    let mut contact = vec!["Contact Information".to_string(), format!("  Email:   {}", user.email)];
    if let Some(phone) = &user.phone {
        contact.push(format!("  Phone:   {phone}"));
    }
    if let Some(website) = &user.website {
        contact.push(format!("  Website: {website}"));
    }
    sections.push(contact.join("\n"));

    if let Some(address) = &user.address {
        sections.push(address_block(address));
    }
    if let Some(company) = &user.company {
        sections.push(company_block(company));
    }

    sections.join("\n\n")
}

fn address_block(address: &Address) -> String {
    let mut lines = vec!["Address".to_string()];
    for pair in [[&address.street, &address.suite], [&address.city, &address.zipcode]] {
        let parts: Vec<&str> = pair.iter().filter_map(|part| part.as_deref()).collect();
        if !parts.is_empty() {
            lines.push(format!("  {}", parts.join(", ")));
        }
    }
    if let Some(geo) = &address.geo {
        lines.push(format!("  Lat: {}, Lng: {}", geo.lat, geo.lng));
    }
    lines.join("\n")
}

fn company_block(company: &Company) -> String {
    let mut lines = vec!["Company".to_string()];
    if let Some(name) = &company.name {
        lines.push(format!("  {name}"));
    }
    if let Some(catch_phrase) = &company.catch_phrase {
        lines.push(format!("  \"{catch_phrase}\""));
    }
    if let Some(bs) = &company.bs {
        lines.push(format!("  {bs}"));
    }
    lines.join("\n")
}
