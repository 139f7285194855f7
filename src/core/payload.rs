//! Builds the text payloads encoded into each QR code.

use crate::config::toml_config::{Address, Organization};
use crate::domain::model::{ContactPayload, PayloadKind};
use crate::utils::error::{QrGenError, Result};
use qrcode::types::QrError;
use qrcode::{EcLevel, QrCode};

pub fn build_payload(org: &Organization) -> ContactPayload {
    ContactPayload {
        web: org.website.clone(),
        email: mailto_uri(&org.email),
        phone: tel_uri(&org.phone),
        location: geo_uri(&org.address),
        full_card: vcard(org),
    }
}

pub fn mailto_uri(email: &str) -> String {
    format!("mailto:{}", email.trim())
}

/// RFC 3966 不允許空白，改用 '-' 作為視覺分隔
pub fn tel_uri(phone: &str) -> String {
    let number = phone.split_whitespace().collect::<Vec<_>>().join("-");
    format!("tel:{}", number)
}

pub fn geo_uri(address: &Address) -> String {
    let (lat, lon) = match (address.latitude, address.longitude) {
        (Some(lat), Some(lon)) => (lat, lon),
        _ => (0.0, 0.0),
    };

    let query = location_query(address);
    if query.is_empty() {
        return format!("geo:{},{}", lat, lon);
    }

    // RFC 5870 的查詢字串中 '+' 是字面字元，空白必須編成 %20
    format!("geo:{},{}?q={}", lat, lon, urlencoding::encode(&query))
}

/// 地圖搜尋用的可讀地址，例如 "San Carlos Sur, Argentina"
pub fn location_query(address: &Address) -> String {
    [
        &address.street,
        &address.locality,
        &address.region,
        &address.country,
    ]
    .into_iter()
    .filter_map(|part| part.as_deref().map(str::trim))
    .filter(|part| !part.is_empty())
    .collect::<Vec<_>>()
    .join(", ")
}

pub fn vcard(org: &Organization) -> String {
    let address = &org.address;
    let component = |value: &Option<String>| escape_vcard_text(value.as_deref().unwrap_or(""));

    let mut lines = vec![
        "BEGIN:VCARD".to_string(),
        "VERSION:3.0".to_string(),
        format!("FN:{}", escape_vcard_text(&org.name)),
        format!("ORG:{}", escape_vcard_text(&org.organization)),
        format!("TEL:{}", escape_vcard_text(&org.phone)),
        format!("EMAIL:{}", escape_vcard_text(&org.email)),
        format!("URL:{}", org.website),
        format!(
            "ADR:;;{};{};{};{};{}",
            component(&address.street),
            component(&address.locality),
            component(&address.region),
            component(&address.postal_code),
            component(&address.country),
        ),
    ];

    if let Some(note) = org.note.as_deref().filter(|n| !n.trim().is_empty()) {
        lines.push(format!("NOTE:{}", escape_vcard_text(note)));
    }

    lines.push("END:VCARD".to_string());
    lines.join("\n")
}

/// RFC 2426 文字值跳脫
fn escape_vcard_text(value: &str) -> String {
    let mut out = String::with_capacity(value.len());
    for c in value.chars() {
        match c {
            '\\' => out.push_str("\\\\"),
            ',' => out.push_str("\\,"),
            ';' => out.push_str("\\;"),
            '\n' => out.push_str("\\n"),
            '\r' => {}
            _ => out.push(c),
        }
    }
    out
}

/// Rejects text that does not fit any QR version at `level`.
pub fn check_capacity(kind: PayloadKind, text: &str, level: EcLevel) -> Result<()> {
    match QrCode::with_error_correction_level(text.as_bytes(), level) {
        Ok(_) => Ok(()),
        Err(QrError::DataTooLong) => Err(QrGenError::PayloadTooLong {
            kind,
            length: text.len(),
            level,
        }),
        Err(e) => Err(QrGenError::EncodeError(e)),
    }
}
