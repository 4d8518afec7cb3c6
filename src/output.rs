//! Output formatting module

use crate::cli::OutputFormat;
use crate::error::Result;
use crate::types::{EstimateReport, EstimationMethod};

pub fn output_report(output_format: OutputFormat, report: &EstimateReport) -> Result<()> {
    if output_format == OutputFormat::Json {
        let content = serde_json::to_string_pretty(report)?;
        println!("{}", content);
    } else {
        // Table format
        println!("\nWeight Estimate");
        println!("===============");
        println!("Method:          {}", report.method.label());

        if let Some(girth) = report.girth_cm {
            println!("Chest girth:     {:.1} cm", girth);
        }

        println!("Estimated weight: {:.2} kg", report.estimated_weight_kg);

        if report.method == EstimationMethod::Photo {
            if let Some(ref reasoning) = report.reasoning {
                println!("\nReasoning:");
                println!("{}", reasoning);
            }
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::WeightEstimate;

    #[test]
    fn test_json_report_shape() {
        let report = EstimateReport::from_photo(WeightEstimate {
            estimated_weight_kg: 38.5,
            reasoning: "Cabra adulta.".to_string(),
        });
        let json = serde_json::to_value(&report).unwrap();
        assert_eq!(json["method"], "photo");
        assert_eq!(json["estimatedWeightKg"], 38.5);
        assert_eq!(json["reasoning"], "Cabra adulta.");
        assert!(json.get("girthCm").is_none());
    }

    #[test]
    fn test_girth_report_omits_reasoning() {
        let report = EstimateReport::from_girth(80.5, 4.64);
        let json = serde_json::to_value(&report).unwrap();
        assert_eq!(json["method"], "girth");
        assert_eq!(json["girthCm"], 80.5);
        assert!(json.get("reasoning").is_none());
    }
}
