use web_sys::HtmlInputElement;
use yew::prelude::*;

const IMPROVEMENT_RATE: f64 = 0.3;

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct RoiInputs {
    pub leads: f64,
    pub conversion_pct: f64,
    pub deal_value: f64,
}

impl Default for RoiInputs {
    fn default() -> Self {
        Self {
            leads: 100.0,
            conversion_pct: 5.0,
            deal_value: 2000.0,
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct RoiResult {
    pub current: f64,
    pub projected: f64,
    pub additional: f64,
}

pub fn calculate(inputs: RoiInputs) -> RoiResult {
    let current = non_nan(inputs.leads) * (non_nan(inputs.conversion_pct) / 100.0) * non_nan(inputs.deal_value);
    let projected = current * (1.0 + IMPROVEMENT_RATE);
    RoiResult {
        current,
        projected,
        additional: projected - current,
    }
}

pub fn improvement_label() -> String {
    format!("+{}%", (IMPROVEMENT_RATE * 100.0).round() as i64)
}

fn non_nan(v: f64) -> f64 {
    if v.is_finite() {
        v
    } else {
        0.0
    }
}

/// Whole euros, German grouping: `12.345 €` (non-breaking space before the sign).
pub fn format_eur(amount: f64) -> String {
    let rounded = non_nan(amount).round();
    let digits = format!("{}", rounded.abs() as u64);
    let mut grouped = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, c) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            grouped.push('.');
        }
        grouped.push(c);
    }
    let sign = if rounded < 0.0 { "-" } else { "" };
    format!("{}{}\u{a0}€", sign, grouped)
}

fn parse(e: &InputEvent) -> f64 {
    let input: HtmlInputElement = e.target_unchecked_into();
    input.value().parse().unwrap_or(0.0)
}

#[function_component(RoiCalculator)]
pub fn roi_calculator() -> Html {
    let inputs = use_state(RoiInputs::default);
    let result = calculate(*inputs);

    let on_leads = {
        let inputs = inputs.clone();
        Callback::from(move |e: InputEvent| inputs.set(RoiInputs { leads: parse(&e), ..*inputs }))
    };
    let on_conversion = {
        let inputs = inputs.clone();
        Callback::from(move |e: InputEvent| inputs.set(RoiInputs { conversion_pct: parse(&e), ..*inputs }))
    };
    let on_deal = {
        let inputs = inputs.clone();
        Callback::from(move |e: InputEvent| inputs.set(RoiInputs { deal_value: parse(&e), ..*inputs }))
    };

    html! {
        <div class="roi-calculator">
            <div class="roi-inputs">
                <label class="roi-field">
                    <span>{"Monthly leads"}</span>
                    <input type="range" min="10" max="1000" step="10" data-roi-leads="leads" value={inputs.leads.to_string()} oninput={on_leads} />
                    <output data-roi-value="leads">{inputs.leads.to_string()}</output>
                </label>
                <label class="roi-field">
                    <span>{"Conversion rate"}</span>
                    <input type="range" min="1" max="50" step="1" data-roi-conversion="conversion" value={inputs.conversion_pct.to_string()} oninput={on_conversion} />
                    <output data-roi-value="conversion">{format!("{}%", inputs.conversion_pct)}</output>
                </label>
                <label class="roi-field">
                    <span>{"Average deal value"}</span>
                    <input type="range" min="100" max="50000" step="100" data-roi-deal-value="deal-value" value={inputs.deal_value.to_string()} oninput={on_deal} />
                    <output data-roi-value="deal-value">{format_eur(inputs.deal_value)}</output>
                </label>
            </div>
            <dl class="roi-results">
                <div><dt>{"Current revenue"}</dt><dd data-roi-result="current-revenue">{format_eur(result.current)}</dd></div>
                <div><dt>{"With AI agents"}</dt><dd data-roi-result="projected-revenue">{format_eur(result.projected)}</dd></div>
                <div><dt>{"Additional revenue"}</dt><dd data-roi-result="additional-revenue">{format_eur(result.additional)}</dd></div>
                <div><dt>{"Improvement"}</dt><dd data-roi-result="improvement-rate">{improvement_label()}</dd></div>
            </dl>
        </div>
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn projected_is_thirty_percent_more() {
        let r = calculate(RoiInputs {
            leads: 100.0,
            conversion_pct: 10.0,
            deal_value: 1000.0,
        });
        assert!((r.current - 10_000.0).abs() < 1e-6);
        assert!((r.projected - 13_000.0).abs() < 1e-6);
        assert!((r.additional - 3_000.0).abs() < 1e-6);
        assert_eq!(improvement_label(), "+30%");
    }

    #[test]
    fn german_euro_formatting() {
        assert_eq!(format_eur(12_345.0), "12.345\u{a0}€");
        assert_eq!(format_eur(1_234_567.4), "1.234.567\u{a0}€");
        assert_eq!(format_eur(999.5), "1.000\u{a0}€");
        assert_eq!(format_eur(0.0), "0\u{a0}€");
        assert_eq!(format_eur(f64::NAN), "0\u{a0}€");
    }

    #[test]
    fn garbage_inputs_count_as_zero() {
        let r = calculate(RoiInputs {
            leads: f64::NAN,
            ..RoiInputs::default()
        });
        assert_eq!(r.current, 0.0);
    }
}
