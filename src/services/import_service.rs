//! Parsing of uploaded spreadsheet exports for bulk team registration.
//!
//! Accepts plain tabular text (comma, semicolon, or tab separated). The
//! first non-empty line is treated as a header and skipped. Any purely
//! numeric cell is discarded: team numbers are always assigned by the
//! server, never taken from the upload.

/// Extract the ordered team-name list from tabular text.
///
/// Returns the names in upload order. Rows without a usable name cell are
/// skipped.
pub fn parse_team_names(content: &str) -> Vec<String> {
    let mut lines = content.lines().filter(|line| !line.trim().is_empty());

    // Header row.
    let _ = lines.next();

    lines.filter_map(parse_row).collect()
}

/// Pick the first non-numeric, non-empty cell of a row as the team name.
fn parse_row(line: &str) -> Option<String> {
    let separator = detect_separator(line);
    line.split(separator)
        .map(clean_cell)
        .find(|cell| !cell.is_empty() && !is_numeric(cell))
}

fn detect_separator(line: &str) -> char {
    if line.contains('\t') {
        '\t'
    } else if line.contains(';') {
        ';'
    } else {
        ','
    }
}

fn clean_cell(cell: &str) -> String {
    cell.trim().trim_matches('"').trim().to_string()
}

fn is_numeric(cell: &str) -> bool {
    cell.parse::<f64>().is_ok()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn header_row_is_skipped() {
        let names = parse_team_names("Nr,Team\n1,Alpha\n2,Beta\n");
        assert_eq!(names, vec!["Alpha", "Beta"]);
    }

    #[test]
    fn numeric_column_is_discarded_regardless_of_position() {
        let names = parse_team_names("Team,Nr\nAlpha,7\nBeta,3\n");
        assert_eq!(names, vec!["Alpha", "Beta"]);
    }

    #[test]
    fn upload_order_is_preserved_over_numbering_hints() {
        // The numbering column says 3,1,2 but list order wins.
        let names = parse_team_names("Nr;Team\n3;Gamma\n1;Alpha\n2;Beta\n");
        assert_eq!(names, vec!["Gamma", "Alpha", "Beta"]);
    }

    #[test]
    fn tab_separated_and_quoted_cells() {
        let names = parse_team_names("Nr\tTeam\n1\t\"The Quizzards\"\n2\tBeta\n");
        assert_eq!(names, vec!["The Quizzards", "Beta"]);
    }

    #[test]
    fn blank_and_unusable_rows_are_skipped() {
        let names = parse_team_names("Nr,Team\n\n1,\n2,Beta\n,,\n");
        assert_eq!(names, vec!["Beta"]);
    }

    #[test]
    fn single_column_upload_without_numbers() {
        let names = parse_team_names("Team\nAlpha\nBeta\n");
        assert_eq!(names, vec!["Alpha", "Beta"]);
    }
}
