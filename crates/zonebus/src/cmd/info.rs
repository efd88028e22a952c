use zonebus_bus::AddressMap;

use crate::cmd::InfoArgs;
use crate::exit::{CliResult, SUCCESS};
use crate::output::{print_address_map, OutputFormat};

pub fn run(_args: InfoArgs, format: OutputFormat) -> CliResult<i32> {
    print_address_map(&AddressMap::default(), format);
    Ok(SUCCESS)
}
