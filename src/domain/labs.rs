//! Positional threshold engine over lab values.
//!
//! Every call receives the full history of values supplied so far. The number
//! of values decides which question is pending; once all required values are
//! present the cutoffs in [`Thresholds`] pick the result.
//!
//! Gender-agnostic layout: `[wbc, plt_or_retic, retic_or_mcv, mcv]`.
//! Screening layout: `sex hb wbc ...`, stopping early when Hb is normal.

use tracing::debug;

use crate::domain::thresholds::{Sex, Thresholds};

/// Value the engine is waiting for.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Prompt {
    Sex,
    Hb,
    Wbc,
    Plt,
    Retic,
    Mcv,
}

impl Prompt {
    pub fn request(&self) -> &'static str {
        match self {
            Prompt::Sex => "性別を入力してください (m or f)",
            Prompt::Hb => "Hb(g/dL)を入力してください",
            Prompt::Wbc => "WBCを入力してください",
            Prompt::Plt => "PLT(万)を入力",
            Prompt::Retic => "Retic(%)を入力",
            Prompt::Mcv => "MCVを入力",
        }
    }

    /// Sample value shown in the usage hint.
    pub fn example(&self) -> &'static str {
        match self {
            Prompt::Sex => "m",
            Prompt::Hb => "10.5",
            Prompt::Wbc => "4500",
            Prompt::Plt => "8",
            Prompt::Retic => "1.5",
            Prompt::Mcv => "85",
        }
    }
}

/// Terminal outcomes of the numeric flow.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ResultKind {
    Pancytopenia,
    HemolysisOrHemorrhage,
    Macrocytic,
    Microcytic,
    Normocytic,
}

impl ResultKind {
    pub fn headline(&self, mcv: Option<f64>) -> String {
        let mcv = mcv.map(|v| format!(" (MCV {:.0})", v)).unwrap_or_default();
        match self {
            ResultKind::Pancytopenia => "汎血球減少 → 骨髄検査を検討".to_string(),
            ResultKind::HemolysisOrHemorrhage => "網赤血球増加 → 溶血または出血性貧血".to_string(),
            ResultKind::Macrocytic => format!("大球性貧血{}", mcv),
            ResultKind::Microcytic => format!("小球性貧血{}", mcv),
            ResultKind::Normocytic => format!("正球性貧血{}", mcv),
        }
    }

    pub fn diagnoses(&self) -> &'static [&'static str] {
        match self {
            ResultKind::Pancytopenia => &[
                "再生不良性貧血",
                "骨髄異形成症候群",
                "骨髄線維症",
                "巨赤芽球性貧血",
                "白血病",
                "肝疾患・脾機能亢進症",
            ],
            ResultKind::HemolysisOrHemorrhage => {
                &["溶血性貧血（溶血所見あり）", "出血性貧血（溶血所見なし）"]
            }
            ResultKind::Macrocytic => &[
                "巨赤芽球性貧血 (VitB12/葉酸欠乏)",
                "骨髄異形成症候群",
                "肝疾患",
                "甲状腺機能低下症",
                "アルコール性",
            ],
            ResultKind::Microcytic => &[
                "鉄欠乏性貧血",
                "慢性炎症に伴う貧血 (ACI)",
                "サラセミア",
                "鉄芽球性貧血",
            ],
            ResultKind::Normocytic => &[
                "腎性貧血 (EPO低下)",
                "慢性炎症に伴う貧血",
                "溶血性貧血",
                "赤芽球癆",
            ],
        }
    }

    /// Follow-up measurement as (title, subtitle).
    pub fn hint(&self) -> Option<(&'static str, &'static str)> {
        match self {
            ResultKind::Pancytopenia => None,
            ResultKind::HemolysisOrHemorrhage => Some((
                "💡 溶血所見を確認",
                "間接Bil↑, LDH↑, ハプトグロビン↓, ヘモジデリン尿",
            )),
            ResultKind::Macrocytic => Some((
                "💡 VitB12・葉酸を測定してください",
                "欠乏があれば巨赤芽球性貧血、なければ他疾患を検討",
            )),
            ResultKind::Microcytic => Some((
                "💡 Fe, TIBC, フェリチンを測定",
                "Fe↓TIBC↑Fer↓→鉄欠乏 / Fe↓TIBC正常〜↓Fer正常〜↑→ACI",
            )),
            ResultKind::Normocytic => Some((
                "💡 EPO・フェリチン・CRPを測定",
                "EPO低値→腎性貧血 / 炎症所見あり→ACI",
            )),
        }
    }
}

/// Outcome of one evaluation.
#[derive(Debug, Clone, PartialEq)]
pub enum LabStep {
    /// Next value is missing.
    Ask {
        prompt: Prompt,
        /// Interpretation of the values so far, e.g. `WBC 3500 (低値)`
        findings: Vec<String>,
        /// Tokens already supplied, formatted for echoing
        supplied: Vec<String>,
    },
    /// Hb at or above the cutoff; nothing further is requested.
    NoAnemia { sex: Sex, hb: f64, threshold: f64 },
    Conclude { kind: ResultKind, mcv: Option<f64> },
}

impl LabStep {
    pub fn pending(&self) -> Option<Prompt> {
        match self {
            LabStep::Ask { prompt, .. } => Some(*prompt),
            _ => None,
        }
    }
}

/// Extract decimal values, silently dropping anything else.
pub fn parse_values(query: &str) -> Vec<f64> {
    query
        .split_whitespace()
        .filter_map(|token| token.parse::<f64>().ok())
        .filter(|v| v.is_finite())
        .collect()
}

/// Echo format: one fractional digit below 100, none from 100 up.
pub fn format_value(value: f64) -> String {
    if value < 100.0 {
        format!("{:.1}", value)
    } else {
        format!("{:.0}", value)
    }
}

/// Value shown in a finding: rounded to `decimals`, unless rounding would
/// carry it to the other side of `cutoff`.
fn finding_value(value: f64, decimals: usize, cutoff: f64) -> String {
    let rounded = format!("{:.*}", decimals, value);
    match rounded.parse::<f64>() {
        Ok(r) if (r < cutoff) == (value < cutoff) => rounded,
        _ => value.to_string(),
    }
}

#[derive(Debug, Default)]
struct Trail {
    findings: Vec<String>,
    supplied: Vec<String>,
}

impl Trail {
    fn record(&mut self, value: f64, finding: String) {
        self.supplied.push(format_value(value));
        self.findings.push(finding);
    }

    fn ask(self, prompt: Prompt) -> LabStep {
        debug!("pending: {:?} after {} values", prompt, self.supplied.len());
        LabStep::Ask {
            prompt,
            findings: self.findings,
            supplied: self.supplied,
        }
    }
}

/// Gender-agnostic flow, starting at WBC.
pub fn evaluate(values: &[f64], t: &Thresholds) -> LabStep {
    from_wbc(values, Trail::default(), t)
}

/// Gender-aware flow: `sex hb wbc ...`.
///
/// Values are read only after the first recognised sex token.
pub fn evaluate_screening(query: &str, t: &Thresholds) -> LabStep {
    // Tokens before the first sex token are dropped like any other junk.
    let mut tokens = query.split_whitespace();
    let Some(sex) = tokens.find_map(Sex::from_token) else {
        return Trail::default().ask(Prompt::Sex);
    };
    let values = parse_values(&tokens.collect::<Vec<_>>().join(" "));

    let mut trail = Trail::default();
    trail.supplied.push(sex.to_string());
    trail.findings.push(format!("性別: {}", sex));

    let Some(&hb) = values.first() else {
        return trail.ask(Prompt::Hb);
    };
    let threshold = t.hb_anemia(sex);
    if hb >= threshold {
        debug!("hb {} >= {}: no anemia", hb, threshold);
        return LabStep::NoAnemia { sex, hb, threshold };
    }
    trail.record(hb, format!("Hb {} (貧血)", finding_value(hb, 1, threshold)));
    from_wbc(&values[1..], trail, t)
}

fn from_wbc(values: &[f64], mut trail: Trail, t: &Thresholds) -> LabStep {
    let Some(&wbc) = values.first() else {
        return trail.ask(Prompt::Wbc);
    };
    let wbc_low = wbc < t.wbc_low;
    let label = if wbc_low { "低値" } else { "正常" };
    trail.record(wbc, format!("WBC {} ({})", finding_value(wbc, 0, t.wbc_low), label));

    let mut rest = &values[1..];
    if wbc_low {
        let Some(&plt) = rest.first() else {
            return trail.ask(Prompt::Plt);
        };
        if plt < t.plt_low {
            return LabStep::Conclude {
                kind: ResultKind::Pancytopenia,
                mcv: None,
            };
        }
        trail.record(plt, format!("PLT {}万", finding_value(plt, 0, t.plt_low)));
        rest = &rest[1..];
    }

    let Some(&retic) = rest.first() else {
        return trail.ask(Prompt::Retic);
    };
    if retic >= t.retic_high {
        return LabStep::Conclude {
            kind: ResultKind::HemolysisOrHemorrhage,
            mcv: None,
        };
    }
    trail.record(retic, format!("Retic {}% (正常)", finding_value(retic, 1, t.retic_high)));

    let Some(&mcv) = rest.get(1) else {
        return trail.ask(Prompt::Mcv);
    };
    let kind = if mcv >= t.mcv_high {
        ResultKind::Macrocytic
    } else if mcv <= t.mcv_low {
        ResultKind::Microcytic
    } else {
        ResultKind::Normocytic
    };
    LabStep::Conclude {
        kind,
        mcv: Some(mcv),
    }
}
