//! Face detection, comparison, verification, and identification shapes.

// self
use crate::{
	_prelude::*,
	api::Endpoint,
	dispatch::{Dispatcher, Envelope},
	http::{ApiHttpClient, TransportErrorMapper},
};

/// Detection tuning accepted by [`Endpoint::DetectFace`].
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum DetectMode {
	/// Detects every face in the image.
	#[default]
	Normal,
	/// Optimized for a single large face.
	BigFace,
}
impl From<DetectMode> for u8 {
	fn from(mode: DetectMode) -> Self {
		match mode {
			DetectMode::Normal => 0,
			DetectMode::BigFace => 1,
		}
	}
}

/// Attributes of one detected face.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Face {
	/// Identifier assigned by the service.
	pub face_id: String,
	/// Left edge in pixels.
	pub x: i32,
	/// Top edge in pixels.
	pub y: i32,
	/// Width in pixels.
	pub width: f32,
	/// Height in pixels.
	pub height: f32,
	/// Gender score, 0 (female) to 100 (male).
	pub gender: i32,
	/// Estimated age.
	pub age: i32,
	/// Expression score, 0 (neutral) to 100 (laughing).
	pub expression: i32,
	/// Whether glasses are worn.
	pub glass: bool,
	/// Head pitch in degrees.
	pub pitch: i32,
	/// Head yaw in degrees.
	pub yaw: i32,
	/// Head roll in degrees.
	pub roll: i32,
}

/// Request body for [`Endpoint::DetectFace`].
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct DetectFaceRequest {
	/// Decimal application id.
	pub app_id: String,
	/// Base64-encoded image.
	pub image: String,
	/// `0` for normal detection, `1` for big-face mode. Omitted on the wire when `0`.
	#[serde(default, skip_serializing_if = "is_normal_mode")]
	pub mode: u8,
}

fn is_normal_mode(mode: &u8) -> bool {
	*mode == u8::from(DetectMode::Normal)
}

/// Body of a [`Endpoint::DetectFace`] response.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DetectFaceBody {
	/// Session identifier echoed by the service.
	pub session_id: String,
	/// Identifier of the analyzed image.
	pub image_id: String,
	/// Image width in pixels.
	pub image_width: i32,
	/// Image height in pixels.
	pub image_height: i32,
	/// Detected faces.
	pub face: Vec<Face>,
}
/// Response of [`Endpoint::DetectFace`].
pub type DetectFaceResponse = Envelope<DetectFaceBody>;

/// Request body for [`Endpoint::FaceCompare`].
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct FaceCompareRequest {
	/// Decimal application id.
	pub app_id: String,
	/// First base64-encoded image.
	#[serde(rename = "imageA")]
	pub image_a: String,
	/// Second base64-encoded image.
	#[serde(rename = "imageB")]
	pub image_b: String,
}

/// Body of a [`Endpoint::FaceCompare`] response.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FaceCompareBody {
	/// Session identifier echoed by the service.
	pub session_id: String,
	/// Similarity score from 0 to 100.
	pub similarity: f32,
}
/// Response of [`Endpoint::FaceCompare`].
pub type FaceCompareResponse = Envelope<FaceCompareBody>;

/// Request body for [`Endpoint::FaceVerify`].
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct FaceVerifyRequest {
	/// Decimal application id.
	pub app_id: String,
	/// Base64-encoded image.
	pub image: String,
	/// Person to verify against.
	pub person_id: String,
}

/// Body of a [`Endpoint::FaceVerify`] response.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FaceVerifyBody {
	/// Session identifier echoed by the service.
	pub session_id: String,
	/// Whether the image shows the person.
	pub ismatch: bool,
	/// Confidence score from 0 to 100.
	pub confidence: f32,
}
/// Response of [`Endpoint::FaceVerify`].
pub type FaceVerifyResponse = Envelope<FaceVerifyBody>;

/// Request body for [`Endpoint::FaceIdentify`].
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct FaceIdentifyRequest {
	/// Decimal application id.
	pub app_id: String,
	/// Base64-encoded image.
	pub image: String,
	/// Group to search.
	pub group_id: String,
}

/// One match returned by [`Endpoint::FaceIdentify`].
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Candidate {
	/// Matched person.
	pub person_id: String,
	/// Matched face.
	pub face_id: String,
	/// Confidence score from 0 to 100.
	pub confidence: f32,
	/// Person tag.
	pub tag: String,
}

/// Body of a [`Endpoint::FaceIdentify`] response.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FaceIdentifyBody {
	/// Session identifier echoed by the service.
	pub session_id: String,
	/// Matches, best first.
	pub candidates: Vec<Candidate>,
}
/// Response of [`Endpoint::FaceIdentify`].
pub type FaceIdentifyResponse = Envelope<FaceIdentifyBody>;

/// Request body for [`Endpoint::GetFaceInfo`].
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct GetFaceInfoRequest {
	/// Decimal application id.
	pub app_id: String,
	/// Face to read.
	pub face_id: String,
}

/// Body of a [`Endpoint::GetFaceInfo`] response.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GetFaceInfoBody {
	/// Stored face attributes.
	pub face_info: Face,
}
/// Response of [`Endpoint::GetFaceInfo`].
pub type GetFaceInfoResponse = Envelope<GetFaceInfoBody>;

impl<C, M> Dispatcher<C, M>
where
	C: ?Sized + ApiHttpClient,
	M: ?Sized + TransportErrorMapper<C::TransportError>,
{
	/// Detects faces in a base64-encoded image.
	pub fn detect_face(
		&self,
		image: impl Into<String>,
		mode: DetectMode,
	) -> Result<DetectFaceResponse> {
		let request =
			DetectFaceRequest { app_id: self.app_id(), image: image.into(), mode: mode.into() };

		self.call(Endpoint::DetectFace.as_str(), &request)
	}

	/// Compares the faces in two base64-encoded images.
	pub fn face_compare(
		&self,
		image_a: impl Into<String>,
		image_b: impl Into<String>,
	) -> Result<FaceCompareResponse> {
		let request = FaceCompareRequest {
			app_id: self.app_id(),
			image_a: image_a.into(),
			image_b: image_b.into(),
		};

		self.call(Endpoint::FaceCompare.as_str(), &request)
	}

	/// Verifies that a base64-encoded image shows `person_id`.
	pub fn face_verify(
		&self,
		image: impl Into<String>,
		person_id: impl Into<String>,
	) -> Result<FaceVerifyResponse> {
		let request = FaceVerifyRequest {
			app_id: self.app_id(),
			image: image.into(),
			person_id: person_id.into(),
		};

		self.call(Endpoint::FaceVerify.as_str(), &request)
	}

	/// Searches `group_id` for the person shown in a base64-encoded image.
	pub fn face_identify(
		&self,
		image: impl Into<String>,
		group_id: impl Into<String>,
	) -> Result<FaceIdentifyResponse> {
		let request = FaceIdentifyRequest {
			app_id: self.app_id(),
			image: image.into(),
			group_id: group_id.into(),
		};

		self.call(Endpoint::FaceIdentify.as_str(), &request)
	}

	/// Reads the stored attributes of `face_id`.
	pub fn get_face_info(&self, face_id: impl Into<String>) -> Result<GetFaceInfoResponse> {
		let request = GetFaceInfoRequest { app_id: self.app_id(), face_id: face_id.into() };

		self.call(Endpoint::GetFaceInfo.as_str(), &request)
	}

	pub(crate) fn app_id(&self) -> String {
		self.credential().app_id().to_string()
	}
}
