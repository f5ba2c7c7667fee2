use digest::DynDigest;

/// A digest usable with the hash-to-field expander, i.e. `DynDigest + Default + Clone`.
pub trait FullDigest: DynDigest + Default + Clone {}
impl<T: DynDigest + Default + Clone> FullDigest for T {}
