//! Country lookup backed by a local MaxMind GeoLite2 database.

use maxminddb::Reader;
use std::net::IpAddr;
use tracing::trace;

/// Resolves IP addresses to ISO 3166-1 alpha-2 country codes.
///
/// Reads a GeoLite2 Country (or City) database file loaded into memory at
/// startup. Lookups are local and infallible from the caller's perspective:
/// unparseable addresses and database misses return `None`.
pub struct GeoIpResolver {
    reader: Reader<Vec<u8>>,
}

impl GeoIpResolver {
    /// Loads a MaxMind database from a file path.
    pub fn open(path: &str) -> Result<Self, maxminddb::MaxMindDbError> {
        let reader = Reader::open_readfile(path)?;
        Ok(Self { reader })
    }

    /// Looks up the country code for an IP address.
    pub fn country(&self, ip: &str) -> Option<String> {
        let ip_addr: IpAddr = ip.parse().ok()?;

        let result = self.reader.lookup(ip_addr).ok()?;
        let country: maxminddb::geoip2::Country = result.decode().ok()??;

        let iso_code = country.country.iso_code.map(String::from);

        trace!("GeoIP lookup for {}: country={:?}", ip, iso_code);

        iso_code
    }
}
