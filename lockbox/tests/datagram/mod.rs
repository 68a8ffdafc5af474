mod linearizer;
mod ramp;
