pub mod request;

pub use request::{
    OfferPackageRequest, PackageRequest, ProductPackageRequest, RequestError,
};
