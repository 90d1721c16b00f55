use crate::{
    render::{TimestampBlock, render},
    types::{VideoAnalysis, ViewCount},
};

/// Compact view count: 1.2M, 3.4K, 999
pub fn format_views(views: u64) -> String {
    if views >= 1_000_000 {
        format!("{:.1}M", views as f64 / 1_000_000.0)
    } else if views >= 1_000 {
        format!("{:.1}K", views as f64 / 1_000.0)
    } else {
        views.to_string()
    }
}

/// Plain-text report for the terminal. Raw counts are compacted, preformatted
/// view strings are printed as sent.
pub fn format_analysis_readable(analysis: &VideoAnalysis) -> String {
    let rendered = render(analysis);
    let views = match analysis.views {
        ViewCount::Count(n) => format!("👁️ {} views", format_views(n)),
        _ => rendered.views_line.clone(),
    };

    let mut output = String::new();
    output.push_str(&format!("# {}\n\n", rendered.title));
    output.push_str(&format!(
        "{} | {} | {}\n\n",
        rendered.duration_line, views, rendered.channel_line
    ));

    output.push_str("## Summary\n\n");
    output.push_str(&rendered.summary);
    output.push_str("\n\n");

    if let Some(points) = &rendered.key_points {
        output.push_str("## Key points\n\n");
        for (i, point) in points.iter().enumerate() {
            output.push_str(&format!("{}. {}\n", i + 1, point));
        }
        output.push('\n');
    }

    output.push_str("## Timestamps\n\n");
    match &rendered.timestamps {
        TimestampBlock::Entries(entries) => {
            for entry in entries {
                output.push_str(&format!("{}\n", entry));
            }
        }
        TimestampBlock::Placeholder => output.push_str(&format!("{}\n", rendered.timestamps_text())),
    }

    output
}
