use crate::result_set::ResultSet;
use crate::surface::TextSurface;

// Border layout: left/right verticals and a bottom rule, no top rule.
pub fn render_result_table(surface: &mut TextSurface, result: &ResultSet) {
    if result.columns().is_empty() {
        return;
    }

    let widths = column_widths(result);
    surface.append_line(content_line(result.columns(), &widths));
    surface.append_line(rule_line(&widths));
    for row in result.rows() {
        surface.append_line(content_line(row, &widths));
    }
    surface.append_line(rule_line(&widths));
}

fn column_widths(result: &ResultSet) -> Vec<usize> {
    let mut widths: Vec<usize> = result
        .columns()
        .iter()
        .map(|column| column.chars().count())
        .collect();

    for row in result.rows() {
        for (index, cell) in row.iter().enumerate() {
            widths[index] = widths[index].max(cell.chars().count());
        }
    }
    widths
}

fn content_line<S: AsRef<str>>(cells: &[S], widths: &[usize]) -> String {
    let mut line = String::from("|");
    for (cell, width) in cells.iter().zip(widths) {
        let cell = cell.as_ref();
        line.push(' ');
        line.push_str(cell);
        for _ in cell.chars().count()..*width {
            line.push(' ');
        }
        line.push_str(" |");
    }
    line
}

fn rule_line(widths: &[usize]) -> String {
    let mut line = String::from("+");
    for width in widths {
        for _ in 0..width + 2 {
            line.push('-');
        }
        line.push('+');
    }
    line
}
