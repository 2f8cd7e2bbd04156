// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Deserializer, Serialize, Serializer};

/// AWS regions an application may be registered in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum AwsRegion {
	UsEast1,
	UsEast2,
	UsWest1,
	UsWest2,
	EuWest1,
	EuWest2,
	EuWest3,
	EuCentral1,
	ApSoutheast1,
	ApSoutheast2,
	ApNortheast1,
	ApSouth1,
}

impl AwsRegion {
	/// Every supported region, in display order.
	pub const ALL: [AwsRegion; 12] = [
		AwsRegion::UsEast1,
		AwsRegion::UsEast2,
		AwsRegion::UsWest1,
		AwsRegion::UsWest2,
		AwsRegion::EuWest1,
		AwsRegion::EuWest2,
		AwsRegion::EuWest3,
		AwsRegion::EuCentral1,
		AwsRegion::ApSoutheast1,
		AwsRegion::ApSoutheast2,
		AwsRegion::ApNortheast1,
		AwsRegion::ApSouth1,
	];

	/// The region code, e.g. `us-east-1`.
	pub fn code(&self) -> &'static str {
		match self {
			AwsRegion::UsEast1 => "us-east-1",
			AwsRegion::UsEast2 => "us-east-2",
			AwsRegion::UsWest1 => "us-west-1",
			AwsRegion::UsWest2 => "us-west-2",
			AwsRegion::EuWest1 => "eu-west-1",
			AwsRegion::EuWest2 => "eu-west-2",
			AwsRegion::EuWest3 => "eu-west-3",
			AwsRegion::EuCentral1 => "eu-central-1",
			AwsRegion::ApSoutheast1 => "ap-southeast-1",
			AwsRegion::ApSoutheast2 => "ap-southeast-2",
			AwsRegion::ApNortheast1 => "ap-northeast-1",
			AwsRegion::ApSouth1 => "ap-south-1",
		}
	}

	/// Human-readable label, e.g. `US East (N. Virginia)`.
	pub fn label(&self) -> &'static str {
		match self {
			AwsRegion::UsEast1 => "US East (N. Virginia)",
			AwsRegion::UsEast2 => "US East (Ohio)",
			AwsRegion::UsWest1 => "US West (N. California)",
			AwsRegion::UsWest2 => "US West (Oregon)",
			AwsRegion::EuWest1 => "Europe (Ireland)",
			AwsRegion::EuWest2 => "Europe (London)",
			AwsRegion::EuWest3 => "Europe (Paris)",
			AwsRegion::EuCentral1 => "Europe (Frankfurt)",
			AwsRegion::ApSoutheast1 => "Asia Pacific (Singapore)",
			AwsRegion::ApSoutheast2 => "Asia Pacific (Sydney)",
			AwsRegion::ApNortheast1 => "Asia Pacific (Tokyo)",
			AwsRegion::ApSouth1 => "Asia Pacific (Mumbai)",
		}
	}
}

impl fmt::Display for AwsRegion {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.write_str(self.code())
	}
}

/// A region code outside the supported enumeration.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unsupported AWS region: {0}")]
pub struct UnknownRegion(pub String);

impl FromStr for AwsRegion {
	type Err = UnknownRegion;

	fn from_str(s: &str) -> Result<Self, Self::Err> {
		AwsRegion::ALL
			.iter()
			.copied()
			.find(|region| region.code() == s)
			.ok_or_else(|| UnknownRegion(s.to_string()))
	}
}

impl Serialize for AwsRegion {
	fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
	where
		S: Serializer,
	{
		serializer.serialize_str(self.code())
	}
}

impl<'de> Deserialize<'de> for AwsRegion {
	fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
	where
		D: Deserializer<'de>,
	{
		let code = String::deserialize(deserializer)?;
		code.parse().map_err(serde::de::Error::custom)
	}
}
