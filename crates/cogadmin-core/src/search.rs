// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

use crate::record::ApplicationRecord;
use crate::region::AwsRegion;

/// Case-insensitive substring match against name, region and pool id.
///
/// A known region also matches on its label, so `sing` finds
/// `ap-southeast-1`. An empty query matches every record.
pub fn matches_query(record: &ApplicationRecord, query: &str) -> bool {
	if query.is_empty() {
		return true;
	}
	let needle = query.to_lowercase();
	let region_label = record
		.aws_region
		.parse::<AwsRegion>()
		.map(|region| region.label())
		.unwrap_or_default();

	[
		record.app_name.as_str(),
		record.aws_region.as_str(),
		region_label,
		record.user_pool_id.as_str(),
	]
	.iter()
	.any(|field| field.to_lowercase().contains(&needle))
}

/// Projects the records matching `query`, preserving list order.
pub fn filter_records<'a>(
	records: &'a [ApplicationRecord],
	query: &str,
) -> Vec<&'a ApplicationRecord> {
	records
		.iter()
		.filter(|record| matches_query(record, query))
		.collect()
}

#[cfg(test)]
mod tests {
	use super::*;
	use crate::record::AppId;
	use proptest::prelude::*;

	fn record(id: &str, name: &str, region: &str, pool: &str) -> ApplicationRecord {
		ApplicationRecord {
			id: AppId::new(id),
			app_key: format!("key-{id}"),
			app_name: name.to_string(),
			aws_region: region.to_string(),
			user_pool_id: pool.to_string(),
			client_id: format!("client-{id}"),
			enabled: true,
		}
	}

	fn fixture() -> Vec<ApplicationRecord> {
		vec![
			record("1", "Billing", "us-east-1", "us-east-1_Abc"),
			record("2", "Payroll", "ap-southeast-1", "ap-southeast-1_Xyz"),
			record("3", "", "", ""),
			record("4", "HR Portal", "eu-west-2", "eu-west-2_Hr1"),
		]
	}

	#[test]
	fn empty_query_returns_all_in_order() {
		let records = fixture();
		let ids: Vec<_> = filter_records(&records, "")
			.iter()
			.map(|r| r.id.as_str())
			.collect();
		assert_eq!(ids, vec!["1", "2", "3", "4"]);
	}

	#[test]
	fn region_substring_matches() {
		let records = fixture();
		let hits = filter_records(&records, "sing");
		assert_eq!(hits.len(), 1);
		assert_eq!(hits[0].aws_region, "ap-southeast-1");

		let hits = filter_records(&records, "southeast");
		assert_eq!(hits.len(), 1);
		assert_eq!(hits[0].aws_region, "ap-southeast-1");
	}

	#[test]
	fn match_is_case_insensitive() {
		let records = fixture();
		let hits = filter_records(&records, "PAYROLL");
		assert_eq!(hits.len(), 1);
		assert_eq!(hits[0].id.as_str(), "2");

		let hits = filter_records(&records, "_hr1");
		assert_eq!(hits.len(), 1);
		assert_eq!(hits[0].id.as_str(), "4");
	}

	#[test]
	fn unknown_region_matches_on_code_only() {
		let r = record("5", "Legacy", "sa-east-1", "sa-east-1_Old");
		assert!(matches_query(&r, "SA-EAST"));
		assert!(!matches_query(&r, "paulo"));
	}

	#[test]
	fn client_id_is_not_searched() {
		let records = fixture();
		assert!(filter_records(&records, "client-1").is_empty());
	}

	#[test]
	fn empty_fields_never_match_non_empty_query() {
		let blank = record("9", "", "", "");
		assert!(!matches_query(&blank, "a"));
		assert!(matches_query(&blank, ""));
	}

	proptest! {
		#[test]
		fn results_are_an_ordered_subset(query in "[a-zA-Z0-9_-]{0,6}") {
			let records = fixture();
			let hits = filter_records(&records, &query);
			prop_assert!(hits.len() <= records.len());

			let mut cursor = records.iter();
			for hit in hits {
				prop_assert!(cursor.any(|r| r.id == hit.id));
			}
		}

		#[test]
		fn own_name_always_matches(name in "[a-zA-Z ]{1,16}") {
			let r = record("1", &name, "us-east-1", "us-east-1_A");
			prop_assert!(matches_query(&r, &name.to_uppercase()));
		}
	}
}
