use crate::model::AgeBucket;

/// Label of the button that flips between 12- and 24-hour display.
pub const TOGGLE_LABEL: &str = "Toggle 12 or 24 hour";

/// Class set on the wrapper of the About block.
pub const FOOTER_CLASS: &str = "post block bc2";

fn legend_entry(label: &str, (r, g, b): (u8, u8, u8)) -> String {
    format!(
        r#"<div class="color-box" style="background-color: #{:02X}{:02X}{:02X};">{}</div>"#,
        r, g, b, label
    )
}

/// Static About block: toggle button, explanation, and the color legend.
pub fn about_block() -> String {
    let legend: String = [AgeBucket::Today, AgeBucket::ThisWeek, AgeBucket::Older]
        .into_iter()
        .filter_map(|bucket| Some(legend_entry(bucket.label(), bucket.rgb()?)))
        .collect();

    format!(
        concat!(
            r#"<div class="{class}">"#,
            "<center><br>",
            r#"<button onclick="changeTimeStyle()" class="rbutton">{label}</button>"#,
            "</center>",
            r#"<div class="footer">"#,
            "<h1>About</h1>",
            "<p>This is a non-identifiable completion receipt for the STOPCOVID symptom survey. ",
            "It simply provides evidence of a survey completed at a given time.</p>",
            "<p>Color coding indicates age of receipt at time of page loading.</p>",
            "{legend}",
            "</div>",
            "</div>"
        ),
        class = FOOTER_CLASS,
        label = TOGGLE_LABEL,
        legend = legend,
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn block_contains_toggle_button() {
        let html = about_block();
        assert!(html.contains(TOGGLE_LABEL));
        assert!(html.contains("changeTimeStyle()"));
    }

    #[test]
    fn legend_lists_three_colors_in_order() {
        let html = about_block();
        let today = html.find("#88CCEE;\">Today").unwrap();
        let week = html.find("#DDCC77;\">This Week").unwrap();
        let older = html.find("#CC6677;\">Older").unwrap();
        assert!(today < week && week < older);
        assert_eq!(html.matches(r#"class="color-box""#).count(), 3);
    }

    #[test]
    fn block_is_wrapped_in_footer_class() {
        assert!(about_block().starts_with(r#"<div class="post block bc2">"#));
    }
}
