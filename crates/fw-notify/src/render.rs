// render.rs - Telegram Markdown rendering of a ReadySummary.

use std::fmt::Write;

use chrono::{DateTime, Utc};

use crate::summary::ReadySummary;

pub const NOTHING_READY: &str = "🚚 *Сводка ТК:* грузов, готовых к выдаче, на данный момент нет.";

/// Render the summary. Layout is for reading on a phone; nothing here
/// affects the dedup digest.
pub fn render_markdown(summary: &ReadySummary, report_time: DateTime<Utc>) -> String {
    if summary.is_empty() {
        return NOTHING_READY.to_string();
    }

    let mut msg = String::new();
    // Writing to a String cannot fail.
    let _ = writeln!(
        msg,
        "✅ *Грузы ГОТОВЫ к забору* ({}):\n",
        report_time.format("%d.%m.%Y %H:%M")
    );

    for (carrier, records) in summary.groups() {
        let _ = writeln!(msg, "📦 *{}*:", carrier.display_name());
        for record in records {
            let (icon, payment) = if record.is_paid() {
                ("✅", "Оплачено".to_string())
            } else {
                ("⚠️", plain(&record.payment_status.to_uppercase()))
            };
            let _ = writeln!(msg, "  ├ *№{}*", plain(&record.id));
            let _ = writeln!(msg, "  ├ 🚛 _{}_", plain(&record.sender));
            let _ = writeln!(
                msg,
                "  ├ 📍 _{} ➡️ {}_",
                plain(&record.route.origin),
                plain(&record.route.destination)
            );
            let _ = writeln!(msg, "  ├ ⚖️ _{}_", record.measurements);
            let _ = writeln!(msg, "  ├ {icon} *{payment}*");
            let _ = writeln!(msg, "  └ 🏷 Статус: *{}*", plain(&record.status));
        }
        msg.push('\n');
    }

    let _ = write!(msg, "---\n_Всего к выдаче: *{}* шт._", summary.len());
    msg
}

/// Field text safe inside a legacy Markdown entity, where Telegram allows no
/// escapes. `_` becomes a space; `*`, `` ` ``, `[` and `]` are dropped.
fn plain(text: &str) -> String {
    text.chars()
        .filter(|c| !matches!(c, '*' | '`' | '[' | ']'))
        .map(|c| if c == '_' { ' ' } else { c })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::ExclusionRules;
    use chrono::TimeZone;
    use fw_shipment::{Carrier, Measurements, Route, ShipmentRecord, StatusRules};

    fn when() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2025, 3, 2, 8, 15, 0).unwrap()
    }

    #[test]
    fn empty_summary_says_nothing_ready() {
        assert_eq!(render_markdown(&ReadySummary::default(), when()), NOTHING_READY);
    }

    #[test]
    fn summary_lists_each_record() {
        let mut record = ShipmentRecord::new(Carrier::Pecom, "PK-1")
            .with_sender("ООО ВЕКТОР")
            .with_status("Прибыл на склад")
            .with_payment("Долг: 450")
            .with_route(Route::new("КРД", "АСТРА"));
        record.measurements = Measurements {
            pieces: 2,
            weight_kg: 35.5,
            volume_m3: 0.4,
        };
        let paid = ShipmentRecord::new(Carrier::Pecom, "PK-2")
            .with_status("Готов к выдаче")
            .with_payment("Оплачено")
            .with_route(Route::new("МСК", "АСТРА"));

        let summary = ReadySummary::collect(
            &[record, paid],
            &StatusRules::default(),
            &ExclusionRules::default(),
        );
        let text = render_markdown(&summary, when());

        assert!(text.starts_with("✅ *Грузы ГОТОВЫ к забору* (02.03.2025 08:15):"));
        assert!(text.contains("📦 *ПЭК*:"));
        assert!(text.contains("*№PK-1*"));
        assert!(text.contains("_КРД ➡️ АСТРА_"));
        assert!(text.contains("_2м/ 35.5кг/ 0.4м3_"));
        assert!(text.contains("⚠️ *ДОЛГ: 450*"));
        assert!(text.contains("✅ *Оплачено*"));
        assert!(text.ends_with("_Всего к выдаче: *2* шт._"));
    }

    #[test]
    fn markup_in_fields_cannot_break_entities() {
        let record = ShipmentRecord::new(Carrier::Manual, "MEMO_7")
            .with_sender("ООО *ВЕКТОР*_Юг")
            .with_status("Прибыл [склад] `срочно`")
            .with_payment("Долг: 1_000")
            .with_route(Route::new("КРД", "АСТРА"));
        let summary = ReadySummary::collect(
            &[record],
            &StatusRules::default(),
            &ExclusionRules::default(),
        );
        let text = render_markdown(&summary, when());

        assert!(text.contains("*№MEMO 7*"));
        assert!(text.contains("🚛 _ООО ВЕКТОР Юг_"));
        assert!(text.contains("Статус: *Прибыл склад срочно*"));
        assert!(text.contains("⚠️ *ДОЛГ: 1 000*"));
        assert!(!text.contains('['));
        assert!(!text.contains('`'));
        assert_eq!(text.matches('*').count() % 2, 0);
        assert_eq!(text.matches('_').count() % 2, 0);
    }

    #[test]
    fn plain_keeps_ordinary_text() {
        assert_eq!(plain("Прибыл на склад (100%)"), "Прибыл на склад (100%)");
        assert_eq!(plain("a_b*c"), "a bc");
    }
}
