use std::fmt::Write;

use crate::{
    layout::{
        fixed, group_thousands, truncate_chars, CLASSIFIER_LABEL_LIMIT, DETAIL_LAYOUT,
        SUMMARY_PERCENT, SUMMARY_PRECISION,
    },
    results::{ClassificationRecord, ResultsStats, ResultsTable},
};

const RULE: &str = "----------------------------------------------";

const INCORRECT_DOGS_TITLE: &str =
    "The following images were incorrectly classified as 'dog' or 'not dog':";
const INCORRECT_BREEDS_TITLE: &str = "The following dogs have incorrectly classified breeds:";

/// Optional detail listings appended after the summary block.
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq)]
pub struct ReportOptions {
    pub print_incorrect_dogs: bool,
    pub print_incorrect_breed: bool,
}

/// Print the summary for a run and, if requested, the misclassified images.
pub fn print_results(
    results: &ResultsTable,
    stats: &ResultsStats,
    model: &str,
    options: ReportOptions,
) {
    print!("{}", render_results(results, stats, model, options));
}

pub fn render_results(
    results: &ResultsTable,
    stats: &ResultsStats,
    model: &str,
    options: ReportOptions,
) -> String {
    let mut output = render_summary(stats, model);

    if options.print_incorrect_dogs {
        output.push_str(&render_listing(INCORRECT_DOGS_TITLE, incorrect_dogs(results)));
    }

    if options.print_incorrect_breed {
        output.push_str(&render_listing(
            INCORRECT_BREEDS_TITLE,
            incorrect_breeds(results),
        ));
    }

    output
}

pub fn render_summary(stats: &ResultsStats, model: &str) -> String {
    let mut output = String::new();
    let pct = |value: f64| SUMMARY_PERCENT.pad(&fixed(value, SUMMARY_PRECISION));

    let _ = writeln!(&mut output, "\n{RULE}");
    let _ = writeln!(
        &mut output,
        "Results for CNN architecture : {}",
        model.to_uppercase()
    );
    let _ = writeln!(&mut output);
    let _ = writeln!(
        &mut output,
        "Number of images         : {}",
        group_thousands(stats.n_images)
    );
    let _ = writeln!(
        &mut output,
        "Number of dog images     : {}",
        group_thousands(stats.n_dogs_img)
    );
    let _ = writeln!(
        &mut output,
        "Number of non-dog images : {}",
        group_thousands(stats.n_notdogs_img)
    );
    let _ = writeln!(&mut output);
    let _ = writeln!(
        &mut output,
        "Percent dogs correct     : {}",
        pct(stats.pct_correct_dogs)
    );
    let _ = writeln!(
        &mut output,
        "Percent breeds correct   : {}",
        pct(stats.pct_correct_breed)
    );
    let _ = writeln!(
        &mut output,
        "Percent not dogs correct : {}",
        pct(stats.pct_correct_notdogs)
    );
    let _ = writeln!(
        &mut output,
        "Percent matches correct  : {}",
        pct(stats.pct_match)
    );

    output
}

/// Images whose dog / not-dog classification disagrees with the pet label.
pub fn incorrect_dogs(
    results: &ResultsTable,
) -> impl Iterator<Item = (&String, &ClassificationRecord)> {
    results
        .iter()
        .filter(|(_, record)| record.is_misclassified_dog())
}

/// Dogs recognised as dogs but given the wrong breed.
pub fn incorrect_breeds(
    results: &ResultsTable,
) -> impl Iterator<Item = (&String, &ClassificationRecord)> {
    results
        .iter()
        .filter(|(_, record)| record.is_misclassified_breed())
}

fn render_listing<'a>(
    title: &str,
    rows: impl Iterator<Item = (&'a String, &'a ClassificationRecord)>,
) -> String {
    let mut output = String::new();
    let _ = writeln!(&mut output, "\n\n{title}\n");
    let _ = writeln!(
        &mut output,
        "{}",
        DETAIL_LAYOUT.render(&["Filename", "Pet label", "Classifier label"])
    );
    let _ = writeln!(
        &mut output,
        "{}",
        DETAIL_LAYOUT.render(&["--------", "-----------", "----------------"])
    );

    for (filename, record) in rows {
        let _ = writeln!(
            &mut output,
            "{}",
            DETAIL_LAYOUT.render(&[
                filename.as_str(),
                record.reference_label.as_str(),
                truncate_chars(&record.predicted_label, CLASSIFIER_LABEL_LIMIT),
            ])
        );
    }

    output
}

#[cfg(test)]
mod tests {
    use super::*;

    fn stats() -> ResultsStats {
        ResultsStats {
            n_images: 40,
            n_dogs_img: 30,
            n_notdogs_img: 10,
            pct_correct_dogs: 100.0,
            pct_correct_breed: 90.0,
            pct_correct_notdogs: 100.0,
            pct_match: 75.0,
        }
    }

    fn record(
        reference: &str,
        predicted: &str,
        is_actually_dog: bool,
        is_predicted_dog: bool,
    ) -> ClassificationRecord {
        ClassificationRecord {
            reference_label: reference.into(),
            predicted_label: predicted.into(),
            labels_match: reference == predicted,
            is_actually_dog,
            is_predicted_dog,
        }
    }

    fn table() -> ResultsTable {
        let mut results = ResultsTable::new();
        results.insert(
            "Beagle_01141.jpg".into(),
            record("beagle", "walker hound, walker foxhound", true, true),
        );
        results.insert("cat_01.jpg".into(), record("cat", "cat", false, false));
        results.insert(
            "Boxer_02.jpg".into(),
            record("boxer", "tabby, tabby cat", true, false),
        );
        results.insert(
            "fox_squirrel_01.jpg".into(),
            record("fox squirrel", "dingo, warrigal, warragal, canis dingo", false, true),
        );
        results.insert(
            "Collie_03797.jpg".into(),
            record("collie", "collie", true, true),
        );
        results
    }

    fn listed(output: &str, filename: &str) -> bool {
        output.lines().any(|line| line.starts_with(filename))
    }

    #[test]
    fn summary_block_matches_console_layout() {
        let output = render_summary(&stats(), "resnet");
        let expected = "\n----------------------------------------------\n\
Results for CNN architecture : RESNET\n\
\n\
Number of images         : 40\n\
Number of dog images     : 30\n\
Number of non-dog images : 10\n\
\n\
Percent dogs correct     : 100.00\n\
Percent breeds correct   :  90.00\n\
Percent not dogs correct : 100.00\n\
Percent matches correct  :  75.00\n";
        assert_eq!(output, expected);
    }

    #[test]
    fn summary_groups_large_counts() {
        let mut stats = stats();
        stats.n_images = 12_500;
        stats.pct_correct_dogs = 87.5;
        let output = render_summary(&stats, "vgg");
        assert!(output.contains("Number of images         : 12,500\n"));
        assert!(output.contains("Percent dogs correct     :  87.50\n"));
        assert!(output.contains("Results for CNN architecture : VGG\n"));
    }

    #[test]
    fn default_options_print_only_the_summary() {
        let output = render_results(&table(), &stats(), "alexnet", ReportOptions::default());
        assert_eq!(output, render_summary(&stats(), "alexnet"));
        assert!(!output.contains("Filename"));
    }

    #[test]
    fn incorrect_dogs_lists_only_dog_disagreements() {
        let options = ReportOptions {
            print_incorrect_dogs: true,
            print_incorrect_breed: false,
        };
        let output = render_results(&table(), &stats(), "resnet", options);

        assert!(output.contains(INCORRECT_DOGS_TITLE));
        assert!(!output.contains(INCORRECT_BREEDS_TITLE));
        assert!(listed(&output, "Boxer_02.jpg"));
        assert!(listed(&output, "fox_squirrel_01.jpg"));
        assert!(!listed(&output, "Beagle_01141.jpg"));
        assert!(!listed(&output, "cat_01.jpg"));
        assert!(!listed(&output, "Collie_03797.jpg"));
    }

    #[test]
    fn incorrect_breeds_lists_only_breed_misses() {
        let options = ReportOptions {
            print_incorrect_dogs: false,
            print_incorrect_breed: true,
        };
        let output = render_results(&table(), &stats(), "resnet", options);

        assert!(output.contains(INCORRECT_BREEDS_TITLE));
        assert!(listed(&output, "Beagle_01141.jpg"));
        assert!(!listed(&output, "Boxer_02.jpg"));
        assert!(!listed(&output, "fox_squirrel_01.jpg"));
        assert!(!listed(&output, "Collie_03797.jpg"));
    }

    #[test]
    fn agreeing_dog_flags_produce_no_rows() {
        let mut results = ResultsTable::new();
        results.insert("cat_01.jpg".into(), record("cat", "cat", false, false));
        results.insert("Collie_03797.jpg".into(), record("collie", "collie", true, true));

        assert_eq!(incorrect_dogs(&results).count(), 0);
        assert_eq!(incorrect_breeds(&results).count(), 0);
    }

    #[test]
    fn listing_rows_use_detail_layout_and_cut_long_labels() {
        let output = render_listing("Title", incorrect_dogs(&table()));
        let lines: Vec<_> = output.lines().collect();

        assert_eq!(lines[0], "");
        assert_eq!(lines[1], "");
        assert_eq!(lines[2], "Title");
        assert_eq!(lines[3], "");
        assert_eq!(
            lines[4],
            format!("{:<28} {:<20} {:<28}", "Filename", "Pet label", "Classifier label")
        );
        assert_eq!(
            lines[5],
            format!("{:<28} {:<20} {:<28}", "--------", "-----------", "----------------")
        );
        assert_eq!(
            lines[7],
            format!(
                "{:<28} {:<20} {:<28}",
                "fox_squirrel_01.jpg", "fox squirrel", "dingo, warrigal, warragal, can"
            )
        );
        assert_eq!(lines.len(), 8);
    }

    #[test]
    fn both_listings_keep_rows_under_their_own_title() {
        let options = ReportOptions {
            print_incorrect_dogs: true,
            print_incorrect_breed: true,
        };
        let output = render_results(&table(), &stats(), "resnet", options);

        let dogs_at = output.find(INCORRECT_DOGS_TITLE).unwrap();
        let breeds_at = output.find(INCORRECT_BREEDS_TITLE).unwrap();
        assert!(dogs_at < breeds_at);

        let (dog_section, breed_section) = output.split_at(breeds_at);
        let dog_section = &dog_section[dogs_at..];

        assert!(listed(dog_section, "Boxer_02.jpg"));
        assert!(listed(dog_section, "fox_squirrel_01.jpg"));
        assert!(!listed(dog_section, "Beagle_01141.jpg"));

        assert!(listed(breed_section, "Beagle_01141.jpg"));
        assert!(!listed(breed_section, "Boxer_02.jpg"));
        assert!(!listed(breed_section, "fox_squirrel_01.jpg"));

        assert!(!listed(&output, "cat_01.jpg"));
        assert!(!listed(&output, "Collie_03797.jpg"));
    }

    #[test]
    fn empty_table_prints_headers_only() {
        let options = ReportOptions {
            print_incorrect_dogs: true,
            print_incorrect_breed: true,
        };
        let output = render_results(&ResultsTable::new(), &stats(), "resnet", options);
        assert_eq!(output.matches("Classifier label").count(), 2);
        assert!(output.ends_with("----------------            \n"));
    }
}
