use yew::prelude::*;

#[derive(Properties, PartialEq, Clone)]
pub struct Props {
    /// Percent, 0 to 100.
    pub value: f64,
    pub label: AttrValue,
}

#[function_component(ProgressBar)]
pub fn progress_bar(p: &Props) -> Html {
    let value = p.value.clamp(0.0, 100.0);
    html! {
        <div class="progress" role="progressbar" aria-label={p.label.clone()}
            aria-valuemin="0" aria-valuemax="100" aria-valuenow={format!("{value:.0}")}>
            <div class="progress-fill" style={format!("width: {value}%")}></div>
        </div>
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use futures::executor::block_on;
    use yew::LocalServerRenderer;

    #[test]
    fn progress_is_clamped() {
        let props = Props {
            value: 140.0,
            label: AttrValue::from("Fortschritt"),
        };
        let html = block_on(LocalServerRenderer::<ProgressBar>::with_props(props).render());
        assert!(html.contains("width: 100%"), "{html}");
        assert!(html.contains("aria-valuenow=\"100\""), "{html}");
    }
}
