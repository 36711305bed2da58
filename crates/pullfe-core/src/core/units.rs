/// Boltzmann constant in kcal/mol/K.
pub const KB_KCAL_PER_MOL_K: f64 = 0.0019872041;

/// Temperature at which the pulling simulations are run, in K.
pub const DEFAULT_TEMPERATURE_K: f64 = 300.0;

/// Number of Ångström per nanometer.
pub const ANGSTROM_PER_NM: f64 = 10.0;

/// Thermodynamic beta, `1 / (k_B T)`, in mol/kcal.
///
/// Multiplying an energy in kcal/mol by this value expresses it in units of k_BT.
#[inline]
pub fn beta(temperature_k: f64) -> f64 {
    1.0 / KB_KCAL_PER_MOL_K / temperature_k
}

#[inline]
pub fn angstrom_to_nm(value: f64) -> f64 {
    value / ANGSTROM_PER_NM
}

#[inline]
pub fn kcal_per_mol_to_kt(value: f64, temperature_k: f64) -> f64 {
    value * beta(temperature_k)
}

/// Converts a harmonic force constant from kcal/mol/Å² to k_BT/nm².
#[inline]
pub fn reduced_force_constant(force_constant_kcal_per_mol_a2: f64, temperature_k: f64) -> f64 {
    ANGSTROM_PER_NM * ANGSTROM_PER_NM * beta(temperature_k) * force_constant_kcal_per_mol_a2
}
