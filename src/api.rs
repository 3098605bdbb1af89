//! Endpoint catalog: the service's named endpoints and their typed wire shapes.
//!
//! Every shape is a thin data mapping over [`Dispatcher::call`](crate::dispatch::Dispatcher::call);
//! responses are [`Envelope`](crate::dispatch::Envelope)s around an endpoint-specific body.
//! Image fields carry base64-encoded image data prepared by the caller.

pub mod face;
pub mod person;

pub use face::*;
pub use person::*;

// self
use crate::_prelude::*;

/// Endpoints exposed under `/youtu/api/`.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Endpoint {
	/// Detects faces and their attributes in an image.
	DetectFace,
	/// Scores the similarity of the faces in two images.
	FaceCompare,
	/// Checks whether an image shows a known person.
	FaceVerify,
	/// Searches a group for the person shown in an image.
	FaceIdentify,
	/// Registers a person with an initial face.
	NewPerson,
	/// Removes a person.
	DelPerson,
	/// Adds faces to a person.
	AddFace,
	/// Removes faces from a person.
	DelFace,
	/// Updates a person's name and tag.
	SetInfo,
	/// Reads a person's name, tag, groups, and faces.
	GetInfo,
	/// Lists the application's groups.
	GetGroupIds,
	/// Lists the people in a group.
	GetPersonIds,
	/// Lists a person's faces.
	GetFaceIds,
	/// Reads the attributes of a stored face.
	GetFaceInfo,
}
impl Endpoint {
	/// Every endpoint, in catalog order.
	pub const ALL: [Endpoint; 14] = [
		Endpoint::DetectFace,
		Endpoint::FaceCompare,
		Endpoint::FaceVerify,
		Endpoint::FaceIdentify,
		Endpoint::NewPerson,
		Endpoint::DelPerson,
		Endpoint::AddFace,
		Endpoint::DelFace,
		Endpoint::SetInfo,
		Endpoint::GetInfo,
		Endpoint::GetGroupIds,
		Endpoint::GetPersonIds,
		Endpoint::GetFaceIds,
		Endpoint::GetFaceInfo,
	];

	/// Returns the path segment appended to `/youtu/api/`.
	pub const fn as_str(self) -> &'static str {
		match self {
			Endpoint::DetectFace => "detectface",
			Endpoint::FaceCompare => "facecompare",
			Endpoint::FaceVerify => "faceverify",
			Endpoint::FaceIdentify => "faceidentify",
			Endpoint::NewPerson => "newperson",
			Endpoint::DelPerson => "delperson",
			Endpoint::AddFace => "addface",
			Endpoint::DelFace => "delface",
			Endpoint::SetInfo => "setinfo",
			Endpoint::GetInfo => "getinfo",
			Endpoint::GetGroupIds => "getgroupids",
			Endpoint::GetPersonIds => "getpersonids",
			Endpoint::GetFaceIds => "getfaceids",
			Endpoint::GetFaceInfo => "getfaceinfo",
		}
	}
}
impl AsRef<str> for Endpoint {
	fn as_ref(&self) -> &str {
		self.as_str()
	}
}
impl Display for Endpoint {
	fn fmt(&self, f: &mut Formatter) -> FmtResult {
		f.write_str(self.as_str())
	}
}
