use crate::core::attributes::{AttributeRef, NominalAttribute, NumericAttribute, TimeAttribute};
use crate::core::dataset::Dataset;
use crate::core::instance_header::InstanceHeader;
use crate::core::instances::DenseInstance;
use crate::error::PipelineError;
use crate::utils::file_parsing::{split_csv_preserving_quotes, strip_surrounding_quotes};
use std::fs::File;
use std::io::{BufRead, BufReader, Lines};
use std::path::Path;
use std::sync::Arc;

#[derive(Debug)]
enum AttributeKind {
    Numeric,
    Time(String),
    Nominal(Vec<String>),
}

fn is_comment_or_empty(s: &str) -> bool {
    let t = s.trim();
    t.is_empty() || t.starts_with('%')
}

/// Loads a whole ARFF file into a [`Dataset`]. The final declared attribute
/// becomes the classification target. Any malformed directive, token or row
/// fails the entire load with the offending 1-based line number; rows are
/// never skipped.
pub fn load_dataset(path: &Path) -> Result<Dataset, PipelineError> {
    let file = File::open(path).map_err(|e| PipelineError::load(path, e))?;
    let mut lines = BufReader::new(file).lines();
    let mut line_number = 0usize;

    let header = Arc::new(parse_header(&mut lines, &mut line_number, path)?);

    let mut dataset = Dataset::new(Arc::clone(&header));
    while let Some(line) = next_line(&mut lines, &mut line_number, path)? {
        if is_comment_or_empty(&line) {
            continue;
        }
        let values = parse_instance_values(&header, &line, line_number)?;
        dataset.add_instance(DenseInstance::new(Arc::clone(&header), values, 1.0))?;
    }

    Ok(dataset)
}

fn next_line(
    lines: &mut Lines<BufReader<File>>,
    line_number: &mut usize,
    path: &Path,
) -> Result<Option<String>, PipelineError> {
    match lines.next() {
        Some(Ok(line)) => {
            *line_number += 1;
            Ok(Some(line))
        }
        Some(Err(e)) => Err(PipelineError::load(path, e)),
        None => Ok(None),
    }
}

fn parse_header(
    lines: &mut Lines<BufReader<File>>,
    line_number: &mut usize,
    path: &Path,
) -> Result<InstanceHeader, PipelineError> {
    let mut relation: Option<String> = None;
    let mut attributes: Vec<AttributeRef> = Vec::new();
    let mut pending: Option<(usize, String)> = None;

    loop {
        let Some(line) = next_line(lines, line_number, path)? else {
            return Err(PipelineError::format(
                *line_number,
                "file ended before @data",
            ));
        };
        if is_comment_or_empty(&line) {
            continue;
        }

        let low = line.to_lowercase();
        if low.starts_with("@relation") {
            let raw = line.trim()[9..].trim();
            relation = Some(strip_surrounding_quotes(raw).to_string());
            break;
        } else if low.starts_with("@attribute") || low.starts_with("@data") {
            // header without a relation line; reprocess this directive below
            pending = Some((*line_number, line));
            break;
        } else {
            return Err(PipelineError::format(
                *line_number,
                format!("unsupported header directive: {}", line.trim()),
            ));
        }
    }

    loop {
        let (number, line) = match pending.take() {
            Some(p) => p,
            None => match next_line(lines, line_number, path)? {
                Some(line) => (*line_number, line),
                None => {
                    return Err(PipelineError::format(
                        *line_number,
                        "file ended before @data",
                    ));
                }
            },
        };
        if is_comment_or_empty(&line) {
            continue;
        }

        let low = line.to_lowercase();
        if low.starts_with("@attribute") {
            let (name, kind) = parse_attribute_line(&line, number)?;
            attributes.push(build_attribute(name, kind));
        } else if low.starts_with("@data") {
            break;
        } else {
            return Err(PipelineError::format(
                number,
                format!("unsupported header directive: {}", line.trim()),
            ));
        }
    }

    if attributes.is_empty() {
        return Err(PipelineError::format(
            *line_number,
            "no attributes declared before @data",
        ));
    }

    let class_index = attributes.len() - 1;
    Ok(InstanceHeader::new(
        relation.unwrap_or_else(|| "unnamed_relation".to_string()),
        attributes,
        class_index,
    ))
}

fn build_attribute(name: String, kind: AttributeKind) -> AttributeRef {
    match kind {
        AttributeKind::Numeric => Arc::new(NumericAttribute::new(name)),
        AttributeKind::Time(pattern) => Arc::new(TimeAttribute::new(name, pattern)),
        AttributeKind::Nominal(values) => Arc::new(NominalAttribute::with_values(name, values)),
    }
}

fn parse_attribute_line(line: &str, number: usize) -> Result<(String, AttributeKind), PipelineError> {
    let rest = {
        let mut l = line.trim();
        let low = l.to_ascii_lowercase();
        if !low.starts_with("@attribute") {
            return Err(PipelineError::format(number, "line is not '@attribute'"));
        }
        if let Some(idx) = low.find("@attribute") {
            l = &l[idx + "@attribute".len()..];
        }
        l.trim()
    };

    let (name, after_name) = if rest.starts_with('\'') || rest.starts_with('"') {
        let quote = rest.chars().next().ok_or_else(|| {
            PipelineError::format(number, "attribute name is missing")
        })?;
        let mut end = None;
        for (i, c) in rest.char_indices().skip(1) {
            if c == quote {
                end = Some(i);
                break;
            }
        }
        let end = end.ok_or_else(|| {
            PipelineError::format(number, "attribute name without closing quote marks")
        })?;
        (rest[1..end].to_string(), rest[end + 1..].trim())
    } else {
        let mut it = rest.splitn(2, char::is_whitespace);
        let name = it
            .next()
            .unwrap_or_default()
            .to_string();
        let after = it.next().ok_or_else(|| {
            PipelineError::format(number, format!("attribute '{name}' has no declared kind"))
        })?;
        (name, after.trim())
    };

    let low = after_name.to_ascii_lowercase();
    if low.starts_with("numeric") || low.starts_with("real") || low.starts_with("integer") {
        return Ok((name, AttributeKind::Numeric));
    }

    if low.starts_with("date") {
        let pattern = quoted_pattern(&after_name[4..]).ok_or_else(|| {
            PipelineError::format(
                number,
                format!("date attribute '{name}' requires a quoted format pattern"),
            )
        })?;
        return Ok((name, AttributeKind::Time(pattern)));
    }

    if after_name.starts_with('{') {
        let close = after_name.rfind('}').ok_or_else(|| {
            PipelineError::format(number, "nominal domain without closing '}'")
        })?;

        let values = after_name[1..close]
            .split(',')
            .map(|s| strip_surrounding_quotes(s.trim()).to_string())
            .filter(|s| !s.is_empty())
            .collect::<Vec<_>>();

        if values.is_empty() {
            return Err(PipelineError::format(
                number,
                format!("attribute '{name}' has an empty nominal domain"),
            ));
        }

        return Ok((name, AttributeKind::Nominal(values)));
    }

    Err(PipelineError::format(
        number,
        format!("attribute kind not supported: {after_name}"),
    ))
}

fn quoted_pattern(raw: &str) -> Option<String> {
    let raw = raw.trim();
    let mut chars = raw.chars();
    let quote = match chars.next() {
        Some(q @ ('\'' | '"')) => q,
        _ => return None,
    };
    let rest = &raw[1..];
    let end = rest.find(quote)?;
    let pattern = rest[..end].to_string();
    (!pattern.is_empty()).then_some(pattern)
}

fn parse_instance_values(
    header: &InstanceHeader,
    line: &str,
    number: usize,
) -> Result<Vec<f64>, PipelineError> {
    let tokens = split_csv_preserving_quotes(line);
    if tokens.len() != header.number_of_attributes() {
        return Err(PipelineError::format(
            number,
            format!(
                "row has {} columns but the header declares {} attributes",
                tokens.len(),
                header.number_of_attributes()
            ),
        ));
    }

    let mut values = Vec::with_capacity(tokens.len());
    for (index, raw) in tokens.iter().enumerate() {
        let raw = strip_surrounding_quotes(raw.trim());
        if raw == "?" {
            values.push(f64::NAN);
            continue;
        }
        let value = header.attributes[index]
            .parse_token(raw)
            .map_err(|reason| PipelineError::format(number, reason))?;
        values.push(value);
    }

    Ok(values)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::instances::Instance;
    use crate::testing::write_temp_file;

    const HAWKS_ARFF: &str = "\
@relation hawks

@attribute id numeric
@attribute month numeric
@attribute day numeric
@attribute year numeric
@attribute captureTime DATE \"HH:mm\"
@attribute releaseTime DATE \"HH:mm\"
@attribute age { I, A }
@attribute sex { F, M }
@attribute wing numeric
@attribute weight numeric
@attribute culmen numeric
@attribute hallux numeric
@attribute tail numeric
@attribute species { CH, RT, SS }

@data
1,9,19,1992,13:30,14:02,I,?,385,920,25.7,30.1,219,RT
2,9,22,1992,10:30,10:50,I,F,265,470,18.7,23.5,220,CH
3,9,23,1992,12:45,13:00,I,M,170,170,12.5,14.3,151,SS
";

    #[test]
    fn test_loads_hawks_file_with_types_and_class_index() {
        let file = write_temp_file(HAWKS_ARFF);
        let dataset = load_dataset(file.path()).unwrap();

        assert_eq!(dataset.header().relation_name(), "hawks");
        assert_eq!(dataset.header().number_of_attributes(), 14);
        assert_eq!(dataset.header().class_index(), 13);
        assert_eq!(dataset.header().number_of_classes(), 3);
        assert_eq!(dataset.number_of_instances(), 3);

        let first = &dataset.instances()[0];
        assert_eq!(first.value_at_index(0), Some(1.0));
        // 13:30 is 810 minutes past midnight
        assert_eq!(first.value_at_index(4), Some(810.0));
        assert_eq!(first.value_at_index(6), Some(0.0));
        assert!(first.is_missing_at_index(7));
        assert_eq!(first.class_value(), Some(1.0));
    }

    #[test]
    fn test_comments_and_blank_lines_are_skipped() {
        let text = "\
@relation r
% generated file
@attribute x numeric
@attribute label { a, b }

@data
% first block
1,a

2,b
";
        let file = write_temp_file(text);
        let dataset = load_dataset(file.path()).unwrap();
        assert_eq!(dataset.number_of_instances(), 2);
    }

    #[test]
    fn test_bad_numeric_token_reports_row_line_number() {
        let text = "@relation r\n@attribute x numeric\n@attribute label { a }\n@data\n1,a\noops,a\n";
        let file = write_temp_file(text);

        let err = load_dataset(file.path()).unwrap_err();
        assert!(matches!(err, PipelineError::Format { line: 6, .. }));
        assert!(err.to_string().contains("'oops'"));
        assert!(err.to_string().contains("'x'"));
    }

    #[test]
    fn test_unknown_nominal_label_fails_the_load() {
        let text = "@relation r\n@attribute label { a, b }\n@data\nc\n";
        let file = write_temp_file(text);

        let err = load_dataset(file.path()).unwrap_err();
        assert!(matches!(err, PipelineError::Format { line: 4, .. }));
        assert!(err.to_string().contains("'c'"));
    }

    #[test]
    fn test_wrong_arity_fails_the_load() {
        let text = "@relation r\n@attribute x numeric\n@attribute label { a }\n@data\n1,a,extra\n";
        let file = write_temp_file(text);

        let err = load_dataset(file.path()).unwrap_err();
        assert!(matches!(err, PipelineError::Format { line: 5, .. }));
        assert!(err.to_string().contains("3 columns"));
    }

    #[test]
    fn test_empty_token_is_not_a_missing_value() {
        let text = "@relation r\n@attribute x numeric\n@attribute label { a }\n@data\n,a\n";
        let file = write_temp_file(text);

        assert!(load_dataset(file.path()).is_err());
    }

    #[test]
    fn test_question_mark_loads_as_missing_for_any_kind() {
        let text = "@relation r\n@attribute t DATE \"HH:mm\"\n@attribute label { a }\n@data\n?,a\n";
        let file = write_temp_file(text);

        let dataset = load_dataset(file.path()).unwrap();
        assert!(dataset.instances()[0].is_missing_at_index(0));
    }

    #[test]
    fn test_file_ending_before_data_is_an_error() {
        let file = write_temp_file("@relation r\n@attribute x numeric\n");

        let err = load_dataset(file.path()).unwrap_err();
        assert!(err.to_string().contains("before @data"));
    }

    #[test]
    fn test_unsupported_directive_is_rejected_with_its_line() {
        let file = write_temp_file("@relation r\n@foo bar\n@data\n1\n");

        let err = load_dataset(file.path()).unwrap_err();
        assert!(matches!(err, PipelineError::Format { line: 2, .. }));
        assert!(err.to_string().contains("@foo"));
    }

    #[test]
    fn test_attribute_before_relation_is_tolerated() {
        let file = write_temp_file("@attribute x numeric\n@data\n1\n");

        let dataset = load_dataset(file.path()).unwrap();
        assert_eq!(dataset.header().relation_name(), "unnamed_relation");
        assert_eq!(dataset.header().number_of_attributes(), 1);
    }

    #[test]
    fn test_date_attribute_without_pattern_is_rejected() {
        let file = write_temp_file("@relation r\n@attribute t date\n@data\n1\n");

        let err = load_dataset(file.path()).unwrap_err();
        assert!(matches!(err, PipelineError::Format { line: 2, .. }));
        assert!(err.to_string().contains("quoted format pattern"));
    }

    #[test]
    fn test_quoted_attribute_names_are_unwrapped() {
        let file = write_temp_file("@relation r\n@attribute 'wing span' numeric\n@data\n1\n");

        let dataset = load_dataset(file.path()).unwrap();
        assert_eq!(dataset.header().index_of_attribute("wing span"), Some(0));
    }

    #[test]
    fn test_empty_nominal_domain_is_rejected() {
        let file = write_temp_file("@relation r\n@attribute a {   }\n@data\nx\n");

        let err = load_dataset(file.path()).unwrap_err();
        assert!(err.to_string().contains("empty nominal domain"));
    }

    #[test]
    fn test_missing_file_is_a_load_error() {
        let err = load_dataset(Path::new("no/such/file.arff")).unwrap_err();
        assert!(matches!(err, PipelineError::Load { .. }));
    }
}
