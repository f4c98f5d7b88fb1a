use crate::core::instance_header::InstanceHeader;
use crate::error::PipelineError;
use std::fs::File;
use std::io::{BufRead, BufReader, BufWriter, Write};
use std::path::Path;

/// Rewrites one raw export line into ARFF data-row form. The order is
/// load-bearing: decimal commas must become dots before the semicolon
/// delimiters become commas, and the single-space missing cell (`; ;` in
/// the raw export) is normalized last. Already-converted text must not be
/// passed back in; step one would eat its delimiters. A literal `;` inside
/// a field value is indistinguishable from a delimiter and mis-splits the
/// row; known limitation of the export format.
pub fn transcode_line(line: &str) -> String {
    line.replace(',', ".")
        .replace(';', ",")
        .replace(", ,", ",?,")
}

/// Converts the raw semicolon-delimited export at `csv_path` into an ARFF
/// file at `arff_path`: the preamble comes from `header`, the first source
/// line (column headers) is discarded, and at most `max_rows` data lines
/// are transcoded. Returns the number of data lines written. Both file
/// handles are scoped to this call.
pub fn convert_csv_to_arff(
    csv_path: &Path,
    arff_path: &Path,
    header: &InstanceHeader,
    max_rows: usize,
) -> Result<usize, PipelineError> {
    let source = File::open(csv_path).map_err(|e| PipelineError::load(csv_path, e))?;
    let mut lines = BufReader::new(source).lines();

    match lines.next() {
        Some(Ok(_)) => {}
        Some(Err(e)) => return Err(PipelineError::load(csv_path, e)),
        None => {
            return Err(PipelineError::format(
                1,
                "source file is empty; expected a column header row",
            ));
        }
    }

    let destination = File::create(arff_path).map_err(|e| PipelineError::load(arff_path, e))?;
    let mut writer = BufWriter::new(destination);
    write_preamble(&mut writer, header).map_err(|e| PipelineError::load(arff_path, e))?;

    let mut rows = 0usize;
    for line in lines {
        if rows >= max_rows {
            break;
        }
        let line = line.map_err(|e| PipelineError::load(csv_path, e))?;
        writeln!(writer, "{}", transcode_line(&line))
            .map_err(|e| PipelineError::load(arff_path, e))?;
        rows += 1;
    }

    writer.flush().map_err(|e| PipelineError::load(arff_path, e))?;
    Ok(rows)
}

fn write_preamble(writer: &mut impl Write, header: &InstanceHeader) -> std::io::Result<()> {
    writeln!(writer, "@relation {}", header.relation_name())?;
    writeln!(writer)?;
    for attribute in &header.attributes {
        writeln!(writer, "{}", attribute.arff_representation())?;
    }
    writeln!(writer)?;
    writeln!(writer, "@data")?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::schema;
    use crate::testing::{raw_hawks_csv, write_temp_file};
    use std::fs;
    use tempfile::NamedTempFile;

    #[test]
    fn test_transcode_rewrites_decimals_before_delimiters() {
        assert_eq!(transcode_line("2;9;25,7;CH"), "2,9,25.7,CH");
    }

    #[test]
    fn test_transcode_normalizes_single_space_cells() {
        assert_eq!(transcode_line("1;I; ;920;RT"), "1,I,?,920,RT");
    }

    #[test]
    fn test_transcode_leaves_adjacent_and_edge_gaps_alone() {
        // only the `; ;` idiom is recognized
        assert_eq!(transcode_line("a;;b"), "a,,b");
        assert_eq!(transcode_line(" ;a;b"), " ,a,b");
        assert_eq!(transcode_line("a; ; ;b"), "a,?, ,b");
    }

    #[test]
    fn test_transcode_output_has_no_semicolons_or_raw_gaps() {
        let out = transcode_line("1;9;19;1992;13:30;14:02;I; ;385;920;25,7;30,1;219;RT");
        assert!(!out.contains(';'));
        assert!(!out.contains(", ,"));
        assert_eq!(out, "1,9,19,1992,13:30,14:02,I,?,385,920,25.7,30.1,219,RT");
    }

    #[test]
    fn test_gap_normalization_is_a_no_op_when_reapplied() {
        let once = transcode_line("1;I; ;920;RT");
        assert_eq!(once.replace(", ,", ",?,"), once);
    }

    #[test]
    fn test_transcoding_already_converted_text_is_destructive() {
        let once = transcode_line("2;9;25,7;CH");
        let twice = transcode_line(&once);
        // the new delimiters get re-read as decimal separators
        assert_ne!(twice, once);
        assert_eq!(twice, "2.9.25.7.CH");
    }

    #[test]
    fn test_convert_writes_preamble_from_header() {
        let csv = write_temp_file(&raw_hawks_csv());
        let arff = NamedTempFile::new().unwrap();

        let rows =
            convert_csv_to_arff(csv.path(), arff.path(), &schema::hawks_header(), 891).unwrap();
        assert_eq!(rows, 3);

        let text = fs::read_to_string(arff.path()).unwrap();
        assert!(text.starts_with("@relation hawks\n"));
        assert!(text.contains("@attribute id numeric\n"));
        assert!(text.contains("@attribute captureTime DATE \"HH:mm\"\n"));
        assert!(text.contains("@attribute age { I, A }\n"));
        assert!(text.contains("@attribute species { CH, RT, SS }\n"));
        assert!(text.contains("\n@data\n"));
    }

    #[test]
    fn test_convert_discards_the_column_header_line() {
        let csv = write_temp_file(&raw_hawks_csv());
        let arff = NamedTempFile::new().unwrap();

        convert_csv_to_arff(csv.path(), arff.path(), &schema::hawks_header(), 891).unwrap();

        let text = fs::read_to_string(arff.path()).unwrap();
        assert!(!text.contains("id,month"));
        assert!(!text.contains("id;month"));
    }

    #[test]
    fn test_convert_transcodes_rows_in_order() {
        let csv = write_temp_file(&raw_hawks_csv());
        let arff = NamedTempFile::new().unwrap();

        convert_csv_to_arff(csv.path(), arff.path(), &schema::hawks_header(), 891).unwrap();

        let text = fs::read_to_string(arff.path()).unwrap();
        let data: Vec<&str> = text.lines().skip_while(|l| *l != "@data").skip(1).collect();
        assert_eq!(data.len(), 3);
        assert_eq!(data[0], "1,9,19,1992,13:30,14:02,I,?,385,920,25.7,30.1,219,RT");
    }

    #[test]
    fn test_convert_respects_the_row_cap() {
        let csv = write_temp_file(&raw_hawks_csv());
        let arff = NamedTempFile::new().unwrap();

        let rows =
            convert_csv_to_arff(csv.path(), arff.path(), &schema::hawks_header(), 2).unwrap();
        assert_eq!(rows, 2);

        let text = fs::read_to_string(arff.path()).unwrap();
        let data: Vec<&str> = text.lines().skip_while(|l| *l != "@data").skip(1).collect();
        assert_eq!(data.len(), 2);
    }

    #[test]
    fn test_convert_fails_on_empty_source() {
        let csv = write_temp_file("");
        let arff = NamedTempFile::new().unwrap();

        let err = convert_csv_to_arff(csv.path(), arff.path(), &schema::hawks_header(), 891)
            .unwrap_err();
        assert!(matches!(err, PipelineError::Format { line: 1, .. }));
    }

    #[test]
    fn test_convert_fails_on_missing_source() {
        let arff = NamedTempFile::new().unwrap();

        let err = convert_csv_to_arff(
            Path::new("definitely/not/here.csv"),
            arff.path(),
            &schema::hawks_header(),
            891,
        )
        .unwrap_err();
        assert!(matches!(err, PipelineError::Load { .. }));
        assert!(err.to_string().contains("here.csv"));
    }
}
