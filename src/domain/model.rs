use qrcode::EcLevel;
use serde::Serialize;
use std::fmt;

/// 聯絡資訊的種類，每一種對應一個 QR payload
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum PayloadKind {
    Web,
    Email,
    Phone,
    Location,
    FullCard,
}

impl PayloadKind {
    pub const ALL: [PayloadKind; 5] = [
        PayloadKind::Web,
        PayloadKind::Email,
        PayloadKind::Phone,
        PayloadKind::Location,
        PayloadKind::FullCard,
    ];

    /// 輸出檔名使用的字根
    pub fn file_stem(&self) -> &'static str {
        match self {
            PayloadKind::Web => "web",
            PayloadKind::Email => "email",
            PayloadKind::Phone => "telefono",
            PayloadKind::Location => "ubicacion",
            PayloadKind::FullCard => "contacto_completo",
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            PayloadKind::Web => "web",
            PayloadKind::Email => "email",
            PayloadKind::Phone => "phone",
            PayloadKind::Location => "location",
            PayloadKind::FullCard => "full-card",
        }
    }
}

impl fmt::Display for PayloadKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// The five encoded strings produced for one organization.
///
/// All kinds are always present; the struct is built once per run and never
/// mutated afterwards.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ContactPayload {
    pub web: String,
    pub email: String,
    pub phone: String,
    pub location: String,
    pub full_card: String,
}

impl ContactPayload {
    pub fn get(&self, kind: PayloadKind) -> &str {
        match kind {
            PayloadKind::Web => &self.web,
            PayloadKind::Email => &self.email,
            PayloadKind::Phone => &self.phone,
            PayloadKind::Location => &self.location,
            PayloadKind::FullCard => &self.full_card,
        }
    }

    pub fn iter(&self) -> impl Iterator<Item = (PayloadKind, &str)> + '_ {
        PayloadKind::ALL.into_iter().map(move |kind| (kind, self.get(kind)))
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum RenderStyle {
    Plain,
    Styled,
    Logo,
}

impl RenderStyle {
    /// 每種樣式固定的錯誤修正等級；logo 會遮住中央模組，所以必須用 H
    pub fn ec_level(&self) -> EcLevel {
        match self {
            RenderStyle::Plain => EcLevel::L,
            RenderStyle::Styled => EcLevel::M,
            RenderStyle::Logo => EcLevel::H,
        }
    }

    pub fn file_suffix(&self) -> &'static str {
        match self {
            RenderStyle::Plain => "",
            RenderStyle::Styled => "_estilizado",
            RenderStyle::Logo => "_con_logo",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct RenderJob {
    pub kind: PayloadKind,
    pub style: RenderStyle,
}

impl RenderJob {
    pub const fn new(kind: PayloadKind, style: RenderStyle) -> Self {
        Self { kind, style }
    }

    pub fn file_name(&self, prefix: &str) -> String {
        format!(
            "{}_{}{}.png",
            prefix,
            self.kind.file_stem(),
            self.style.file_suffix()
        )
    }

    pub fn description(&self) -> &'static str {
        match (self.kind, self.style) {
            (PayloadKind::Web, RenderStyle::Plain) => "Website, plain",
            (PayloadKind::Web, RenderStyle::Styled) => "Website, brand colors",
            (PayloadKind::Web, RenderStyle::Logo) => "Website, with logo",
            (PayloadKind::Email, _) => "Contact email",
            (PayloadKind::Phone, _) => "Phone",
            (PayloadKind::Location, _) => "Location",
            (PayloadKind::FullCard, _) => "Full contact card (vCard)",
        }
    }
}

/// 固定的輸出計畫：網站三種樣式，其他聯絡方式只出一般版本
pub const RENDER_PLAN: [RenderJob; 7] = [
    RenderJob::new(PayloadKind::Web, RenderStyle::Plain),
    RenderJob::new(PayloadKind::Web, RenderStyle::Styled),
    RenderJob::new(PayloadKind::Web, RenderStyle::Logo),
    RenderJob::new(PayloadKind::Email, RenderStyle::Plain),
    RenderJob::new(PayloadKind::Phone, RenderStyle::Plain),
    RenderJob::new(PayloadKind::Location, RenderStyle::Plain),
    RenderJob::new(PayloadKind::FullCard, RenderStyle::Plain),
];

#[derive(Debug, Clone)]
pub struct RenderedImage {
    pub job: RenderJob,
    pub file_name: String,
    pub width: u32,
    pub height: u32,
    pub png: Vec<u8>,
}

#[derive(Debug, Clone, Serialize)]
pub struct Artifact {
    pub path: String,
    pub description: &'static str,
    pub width: u32,
    pub height: u32,
}

#[derive(Debug, Clone, Serialize)]
pub struct RunReport {
    pub output_dir: String,
    pub artifacts: Vec<Artifact>,
}
